//! Payload types exchanged between the runtime and a provider.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::provider::{ProviderError, ProviderResult};

/// Resource an access request applies to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Target {
    kind: String,
    #[serde(default)]
    arguments: Map<String, Value>,
}

impl Target {
    /// Creates a target of the given kind.
    #[must_use]
    pub fn new(kind: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            arguments,
        }
    }

    /// Returns the target kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the raw target arguments.
    #[must_use]
    pub fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }

    /// Deserializes the arguments into the provider's own argument type.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidArguments`] when the arguments do not
    /// match `T`.
    pub fn arguments_as<T: DeserializeOwned>(&self) -> ProviderResult<T> {
        serde_json::from_value(Value::Object(self.arguments.clone())).map_err(|err| {
            ProviderError::InvalidArguments {
                kind: self.kind.clone(),
                reason: err.to_string(),
            }
        })
    }
}

/// Reference to the access request that triggered an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRef {
    id: String,
}

impl RequestRef {
    /// Creates a request reference.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Returns the request identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Grant or revoke instruction for a single subject.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessRequest {
    subject: String,
    target: Target,
    request: RequestRef,
}

impl AccessRequest {
    /// Creates an access request.
    #[must_use]
    pub fn new(subject: impl Into<String>, target: Target, request: RequestRef) -> Self {
        Self {
            subject: subject.into(),
            target,
            request,
        }
    }

    /// Returns the subject (usually an email address) receiving access.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the target resource.
    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Returns the originating request reference.
    #[must_use]
    pub fn request(&self) -> &RequestRef {
        &self.request
    }
}

/// Result of a successful grant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantOutcome {
    access_instructions: Option<String>,
}

impl GrantOutcome {
    /// Attaches instructions shown to the subject after access is granted.
    #[must_use]
    pub fn with_access_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.access_instructions = Some(instructions.into());
        self
    }

    /// Returns the access instructions, if any.
    #[must_use]
    pub fn access_instructions(&self) -> Option<&str> {
        self.access_instructions.as_deref()
    }
}

/// Outcome of one configuration check run by the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigCheck {
    #[serde(skip)]
    name: String,
    success: bool,
    logs: Vec<String>,
}

impl ConfigCheck {
    /// Creates a passing check.
    #[must_use]
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
            logs: Vec::new(),
        }
    }

    /// Creates a failing check with a log line explaining why.
    #[must_use]
    pub fn failed(name: impl Into<String>, log: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            logs: vec![log.into()],
        }
    }

    /// Appends a log line.
    #[must_use]
    pub fn with_log(mut self, log: impl Into<String>) -> Self {
        self.logs.push(log.into());
        self
    }

    /// Returns the check name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` when the check passed.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Returns the log lines recorded by the check.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}

/// A unit of resource discovery work.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceTask {
    task: String,
    #[serde(default)]
    ctx: Value,
}

impl ResourceTask {
    /// Creates a task with the given name and context.
    #[must_use]
    pub fn new(task: impl Into<String>, ctx: Value) -> Self {
        Self {
            task: task.into(),
            ctx,
        }
    }

    /// Returns the task name.
    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Returns the task context.
    #[must_use]
    pub fn ctx(&self) -> &Value {
        &self.ctx
    }
}

/// Resources discovered by a task, plus any follow-up tasks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadResourcesOutcome {
    resources: Vec<Value>,
    tasks: Vec<ResourceTask>,
}

impl LoadResourcesOutcome {
    /// Adds a discovered resource.
    #[must_use]
    pub fn with_resource(mut self, resource: Value) -> Self {
        self.resources.push(resource);
        self
    }

    /// Schedules a follow-up task.
    #[must_use]
    pub fn with_task(mut self, task: ResourceTask) -> Self {
        self.tasks.push(task);
        self
    }

    /// Returns the discovered resources.
    #[must_use]
    pub fn resources(&self) -> &[Value] {
        &self.resources
    }

    /// Returns the follow-up tasks.
    #[must_use]
    pub fn tasks(&self) -> &[ResourceTask] {
        &self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct GroupArgs {
        group: String,
    }

    #[test]
    fn access_request_from_json() {
        let request: AccessRequest = serde_json::from_value(json!({
            "subject": "alice@example.com",
            "target": { "kind": "Group", "arguments": { "group": "admins" } },
            "request": { "id": "req_123" }
        }))
        .unwrap();

        assert_eq!(request.subject(), "alice@example.com");
        assert_eq!(request.target().kind(), "Group");
        assert_eq!(request.request().id(), "req_123");
        assert_eq!(
            request.target().arguments_as::<GroupArgs>().unwrap(),
            GroupArgs {
                group: "admins".into()
            }
        );
    }

    #[test]
    fn mismatched_arguments_error() {
        let target = Target::new("Group", Map::new());
        let err = target.arguments_as::<GroupArgs>().expect_err("group missing");
        assert!(matches!(err, ProviderError::InvalidArguments { kind, .. } if kind == "Group"));
    }

    #[test]
    fn grant_outcome_serializes_camel_case() {
        let outcome = GrantOutcome::default().with_access_instructions("log in via SSO");
        assert_eq!(
            serde_json::to_value(outcome).unwrap(),
            json!({ "accessInstructions": "log in via SSO" })
        );
    }
}
