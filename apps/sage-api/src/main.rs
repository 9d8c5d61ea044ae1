use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = sage_api::Args::parse();
	sage_api::run(args).await
}
