use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upper bound on retained transcript entries. Oldest entries drop first;
/// the retained suffix keeps its original order.
pub const CHAT_CAP: usize = 40;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
	Assistant,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ChatTurn {
	pub role: Role,
	pub content: String,
}

/// Accumulated state for one session. The default value doubles as the
/// freshly-reset record: a session with no stored record and a session
/// that was explicitly reset are indistinguishable.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Memory {
	pub goals: Vec<String>,
	pub constraints: Vec<String>,
	pub deadlines: Vec<String>,
	pub plan: BTreeMap<String, Vec<String>>,
	pub chat: Vec<ChatTurn>,
}

/// The chat-free view of [`Memory`] returned to callers and serialized
/// into the prompt context.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MemorySnapshot {
	pub goals: Vec<String>,
	pub constraints: Vec<String>,
	pub deadlines: Vec<String>,
	pub plan: BTreeMap<String, Vec<String>>,
}

impl Memory {
	pub fn snapshot(&self) -> MemorySnapshot {
		MemorySnapshot {
			goals: self.goals.clone(),
			constraints: self.constraints.clone(),
			deadlines: self.deadlines.clone(),
			plan: self.plan.clone(),
		}
	}

	/// Apply a delta with whole-field replacement. Fields the update does
	/// not carry are left untouched; `plan` is replaced in full, never
	/// merged per label.
	pub fn merge(&mut self, update: MemoryUpdate) {
		let MemoryUpdate { goals, constraints, deadlines, plan } = update;

		if let Some(goals) = goals {
			self.goals = goals;
		}
		if let Some(constraints) = constraints {
			self.constraints = constraints;
		}
		if let Some(deadlines) = deadlines {
			self.deadlines = deadlines;
		}
		if let Some(plan) = plan {
			self.plan = plan;
		}
	}

	/// Append one transcript entry, evicting the oldest entries beyond
	/// [`CHAT_CAP`].
	pub fn push_turn(&mut self, role: Role, content: impl Into<String>) {
		self.chat.push(ChatTurn { role, content: content.into() });

		if self.chat.len() > CHAT_CAP {
			let excess = self.chat.len() - CHAT_CAP;

			self.chat.drain(..excess);
		}
	}

	/// The newest `limit` transcript entries, oldest first.
	pub fn recent_chat(&self, limit: usize) -> &[ChatTurn] {
		let start = self.chat.len().saturating_sub(limit);

		&self.chat[start..]
	}
}

/// Delta recovered from a generation payload. Every field is optional;
/// a field that is absent or not a well-formed sequence of strings is
/// dropped here so the merge leaves the prior value alone.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MemoryUpdate {
	pub goals: Option<Vec<String>>,
	pub constraints: Option<Vec<String>>,
	pub deadlines: Option<Vec<String>>,
	pub plan: Option<BTreeMap<String, Vec<String>>>,
}

impl MemoryUpdate {
	pub fn from_value(value: &Value) -> Self {
		let Value::Object(map) = value else {
			return Self::default();
		};

		Self {
			goals: map.get("goals").and_then(string_seq),
			constraints: map.get("constraints").and_then(string_seq),
			deadlines: map.get("deadlines").and_then(string_seq),
			plan: map.get("plan").and_then(plan_map),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.goals.is_none()
			&& self.constraints.is_none()
			&& self.deadlines.is_none()
			&& self.plan.is_none()
	}
}

fn string_seq(value: &Value) -> Option<Vec<String>> {
	let items = value.as_array()?;

	items.iter().map(|item| item.as_str().map(str::to_string)).collect()
}

fn plan_map(value: &Value) -> Option<BTreeMap<String, Vec<String>>> {
	let entries = value.as_object()?;

	entries
		.iter()
		.map(|(label, tasks)| string_seq(tasks).map(|tasks| (label.clone(), tasks)))
		.collect()
}
