use std::env;

use serde_derive::{Deserialize, Serialize};

pub const FUNCTION_NAME_ENV_VAR: &str = "AWS_LAMBDA_FUNCTION_NAME";
pub const FUNCTION_MEMORY_SIZE_ENV_VAR: &str = "AWS_LAMBDA_FUNCTION_MEMORY_SIZE";
pub const FUNCTION_ARN_CONTEXT_KEY: &str = "invoked_function_arn";
pub const REQUEST_ID_CONTEXT_KEY: &str = "aws_request_id";

/// The value of any invocation field that couldn't be loaded.
pub const UNKNOWN: &str = "unknown";

/// The value of the memory size field when it couldn't be loaded.
pub const UNKNOWN_MEMORY_SIZE: &str = "0";

/**
Request-scoped values handed to the function by its runtime.

The field names match the keys the runtime uses, so a context can be deserialized
straight from a map of them.
*/
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub invoked_function_arn: Option<String>,
    #[serde(default)]
    pub aws_request_id: Option<String>,
}

impl RequestContext {
    pub fn new<A, R>(invoked_function_arn: A, aws_request_id: R) -> Self
    where
        A: Into<String>,
        R: Into<String>,
    {
        RequestContext {
            invoked_function_arn: Some(invoked_function_arn.into()),
            aws_request_id: Some(aws_request_id.into()),
        }
    }
}

/**
Metadata about the running function and the current invocation.

Fields that couldn't be loaded hold `UNKNOWN`, or `UNKNOWN_MEMORY_SIZE` for the memory size.
*/
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InvocationContext {
    pub function_name: String,
    pub function_memory_size: String,
    pub function_arn: String,
    pub function_request_id: String,
}

impl InvocationContext {
    /**
    Resolve the invocation context from the process environment and a request.
    */
    pub fn resolve(request: &RequestContext) -> Self {
        Self::resolve_with(request, |key| env::var(key).ok())
    }

    /**
    Resolve the invocation context using `lookup` in place of the process environment.
    */
    pub fn resolve_with<F>(request: &RequestContext, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        InvocationContext {
            function_name: or_sentinel(lookup(FUNCTION_NAME_ENV_VAR), UNKNOWN),
            function_memory_size: or_sentinel(
                lookup(FUNCTION_MEMORY_SIZE_ENV_VAR),
                UNKNOWN_MEMORY_SIZE,
            ),
            function_arn: or_sentinel(request.invoked_function_arn.clone(), UNKNOWN),
            function_request_id: or_sentinel(request.aws_request_id.clone(), UNKNOWN),
        }
    }

    /// A warning for each field that holds its sentinel.
    pub(crate) fn failures(&self) -> Vec<&'static str> {
        let mut failures = Vec::new();

        if self.function_request_id == UNKNOWN {
            failures.push("failed to load function request id");
        }
        if self.function_arn == UNKNOWN {
            failures.push("failed to load function arn");
        }
        if self.function_name == UNKNOWN {
            failures.push("failed to load function name");
        }
        if self.function_memory_size == UNKNOWN_MEMORY_SIZE {
            failures.push("failed to load function memory size");
        }

        failures
    }

    pub(crate) fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("function_name".to_owned(), self.function_name.clone()),
            ("function_memory_size".to_owned(), self.function_memory_size.clone()),
            ("function_arn".to_owned(), self.function_arn.clone()),
            ("function_request_id".to_owned(), self.function_request_id.clone()),
        ]
    }
}

fn or_sentinel(value: Option<String>, sentinel: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| sentinel.to_owned())
}
