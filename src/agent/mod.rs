// Agent tree: a coordinator that hands the learner to one of three specialists.

pub mod conversation;
pub mod exercise;
pub mod framework;
pub mod teacher;

use crate::config::{Delegation, Settings};
use crate::llm::{ModelReference, select_model};
use serde::Serialize;
use tracing::info;

pub use framework::{AgentFramework, AgentParams, Delegates, instantiate};

pub const COORDINATOR_NAME: &str = "lang_agent";

const COORDINATOR_DESCRIPTION: &str = "A language coordinator agent.";

const COORDINATOR_PROMPT: &str = r#"
Role: You are a coordinator agent. You are responsible for coordinating the activities of the other agents.
When a user asks a question, you should determine which agent is best suited to answer the question and delegate the task to them.

Initiation:

Greet the user and let them know you will help them learn English. Ask them what they would like to learn. Offer to help them with their English learning journey based on your capabilities.

You have the following agents at your disposal:
An English teacher agent.
An english conversation agent.
An english exercise agent.

Give the response from the agents back to the user.
"#;

/// Static declaration of one agent, ready to hand to an agent framework.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub instruction: &'static str,
    pub model: ModelReference,
    pub delegation: Delegation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AgentSpec>,
}

impl AgentSpec {
    /// A specialist with no agents of its own.
    pub fn leaf(
        name: &'static str,
        description: &'static str,
        instruction: &'static str,
        model: ModelReference,
    ) -> Self {
        Self {
            name,
            description,
            instruction,
            model,
            delegation: Delegation::default(),
            children: Vec::new(),
        }
    }

    /// Depth-first lookup by agent name, including `self`.
    pub fn find(&self, name: &str) -> Option<&AgentSpec> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Names of every agent in the tree, parents before children.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = vec![self.name];
        for child in &self.children {
            names.extend(child.names());
        }
        names
    }
}

/// Build the coordinator and its specialists. All of them share the model
/// selected from `settings.backend`.
pub fn build_root_agent(settings: &Settings) -> AgentSpec {
    let model = select_model(&settings.backend);

    let children = vec![
        teacher::declare(model.clone()),
        conversation::declare(model.clone()),
        exercise::declare(model.clone()),
    ];

    info!(
        model = model.model(),
        delegation = ?settings.delegation,
        specialists = children.len(),
        "agent tree declared"
    );

    AgentSpec {
        name: COORDINATOR_NAME,
        description: COORDINATOR_DESCRIPTION,
        instruction: COORDINATOR_PROMPT,
        model,
        delegation: settings.delegation,
        children,
    }
}
