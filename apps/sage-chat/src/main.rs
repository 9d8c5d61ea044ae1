use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = sage_chat::Args::parse();
	sage_chat::run(args).await
}
