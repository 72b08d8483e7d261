//! Entry hook that writes a field into a JSON object argument.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use hookwrap_pipeline::{EntryContext, Interceptor, Payload, Phase};

/// Inserts `key: value` into the object at argument `position` before the core runs.
///
/// If the argument is missing or is not an object the input is left as-is.
/// An existing key is overwritten.
#[derive(Debug, Clone)]
pub struct InjectField {
    name: String,
    position: usize,
    key: String,
    value: Value,
}

impl InjectField {
    pub fn new(position: usize, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        Self {
            name: format!("inject:{key}"),
            position,
            key,
            value: value.into(),
        }
    }

    /// Overrides the default `inject:<key>` hook name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

#[async_trait]
impl<O: Payload, E: Payload> Interceptor<Value, O, E> for InjectField {
    fn name(&self) -> &str {
        &self.name
    }

    fn phases(&self) -> &'static [Phase] {
        &[Phase::Entry]
    }

    async fn on_entry(&self, ctx: EntryContext<Value, O, E>) -> Result<Option<Vec<Value>>, E> {
        let mut input = ctx.input;

        match input.get_mut(self.position) {
            Some(Value::Object(map)) => {
                map.insert(self.key.clone(), self.value.clone());
                debug!(hook = %self.name, key = %self.key, "Injected field");
                Ok(Some(input))
            }
            _ => {
                debug!(
                    hook = %self.name,
                    position = self.position,
                    "Argument is not an object, leaving input unchanged"
                );
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hookwrap_pipeline::{Pipeline, wrap};
    use serde_json::json;

    use super::*;

    fn echo_second() -> Pipeline<Value, Value, String> {
        wrap(|args: Vec<Value>| async move { Ok(args.get(1).cloned().unwrap_or(Value::Null)) })
    }

    #[tokio::test]
    async fn test_injects_into_object() {
        let pipeline = echo_second()
            .register_interceptor(Arc::new(InjectField::new(1, "id", "banana")))
            .unwrap();

        let outcome = pipeline
            .invoke(vec![json!("/example"), json!({"kind": "fruit"})])
            .await
            .unwrap();
        assert_eq!(outcome.success(), Some(json!({"kind": "fruit", "id": "banana"})));
    }

    #[tokio::test]
    async fn test_overwrites_existing_key() {
        let pipeline = echo_second()
            .register_interceptor(Arc::new(InjectField::new(1, "id", 7)))
            .unwrap();

        let outcome = pipeline.invoke(vec![json!(null), json!({"id": 1})]).await.unwrap();
        assert_eq!(outcome.success(), Some(json!({"id": 7})));
    }

    #[tokio::test]
    async fn test_non_object_is_left_alone() {
        let pipeline = echo_second()
            .register_interceptor(Arc::new(InjectField::new(1, "id", "banana")))
            .unwrap();

        let outcome = pipeline.invoke(vec![json!(null), json!([1, 2])]).await.unwrap();
        assert_eq!(outcome.success(), Some(json!([1, 2])));

        let outcome = pipeline.invoke(vec![json!(null)]).await.unwrap();
        assert_eq!(outcome.success(), Some(Value::Null));
    }

    #[test]
    fn test_default_name() {
        let hook = InjectField::new(0, "id", "x");
        assert_eq!(hook.key(), "id");
        assert_eq!(hook.position(), 0);
        assert_eq!(Interceptor::<Value, Value, String>::name(&hook), "inject:id");
        assert_eq!(
            Interceptor::<Value, Value, String>::name(&hook.with_name("tag")),
            "tag"
        );
    }
}
