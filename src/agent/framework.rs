//! Seam to the external agent framework.
//!
//! The framework owns agent construction, routing between agents and model
//! calls. This module only describes what its constructors receive and walks
//! an [`AgentSpec`] tree to feed them.

use super::AgentSpec;
use crate::config::Delegation;
use crate::error::Result;
use crate::llm::ModelReference;
use tracing::debug;

/// How a parent agent holds its specialists.
#[derive(Debug)]
pub enum Delegates<A, T> {
    /// Specialists wrapped as agent-as-tool values.
    Tools(Vec<T>),
    /// Specialists attached directly as sub-agents.
    SubAgents(Vec<A>),
}

impl<A, T> Delegates<A, T> {
    pub fn len(&self) -> usize {
        match self {
            Self::Tools(tools) => tools.len(),
            Self::SubAgents(agents) => agents.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Arguments of the framework's agent constructor.
#[derive(Debug)]
pub struct AgentParams<A, T> {
    pub model: ModelReference,
    pub name: String,
    pub description: String,
    pub instruction: String,
    pub delegates: Delegates<A, T>,
}

/// Constructors an agent framework exposes. Errors from the framework are
/// returned as-is.
pub trait AgentFramework {
    type Agent;
    type Tool;

    fn agent(&self, params: AgentParams<Self::Agent, Self::Tool>) -> Result<Self::Agent>;

    /// Wrap an agent so another agent can call it as a tool.
    fn agent_tool(&self, agent: Self::Agent) -> Result<Self::Tool>;
}

/// Construct `spec` and its children, children first.
pub fn instantiate<F: AgentFramework>(framework: &F, spec: &AgentSpec) -> Result<F::Agent> {
    let children = spec
        .children
        .iter()
        .map(|child| instantiate(framework, child))
        .collect::<Result<Vec<_>>>()?;

    let delegates = match spec.delegation {
        Delegation::Tools => Delegates::Tools(
            children
                .into_iter()
                .map(|agent| framework.agent_tool(agent))
                .collect::<Result<Vec<_>>>()?,
        ),
        Delegation::SubAgents => Delegates::SubAgents(children),
    };

    debug!(
        agent = spec.name,
        delegation = ?spec.delegation,
        delegates = delegates.len(),
        "constructing agent"
    );

    framework.agent(AgentParams {
        model: spec.model.clone(),
        name: spec.name.to_string(),
        description: spec.description.to_string(),
        instruction: spec.instruction.to_string(),
        delegates,
    })
}
