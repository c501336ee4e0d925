//! Delete a user, after confirmation.

use anyhow::{Context as _, Result};
use inquire::Confirm;
use tracing::instrument;
use userdir_business::UserId;

use crate::context::AppContext;
use crate::output::Output;

#[instrument(skip_all, name = "delete_user", fields(id = id.as_str(), yes = yes))]
pub async fn run_delete(ctx: AppContext, id: String, yes: bool) -> Result<()> {
    let out = Output::new();
    let id = UserId::from(id.as_str());

    let user = ctx
        .api
        .get_user(&id)
        .await
        .with_context(|| format!("Failed to load user {id}"))?;

    if !yes {
        let confirmed = Confirm::new(&format!(
            "Are you sure you want to delete {} <{}>?",
            user.name, user.email
        ))
        .with_default(false)
        .prompt()
        .context("Failed to read confirmation")?;

        if !confirmed {
            out.info("Cancelled");
            return Ok(());
        }
    }

    ctx.api
        .delete_user(&id)
        .await
        .context("Failed to delete user")?;

    tracing::info!(%id, "User deleted");
    out.success("User deleted successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{self, SubscriberExt as _};
    use userdir_business::BusinessConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Captures the fields recorded on `delete_user` spans.
    #[derive(Clone, Default)]
    struct SpanFields(Arc<Mutex<Vec<(String, String)>>>);

    impl Visit for SpanFields {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.0
                .lock()
                .unwrap()
                .push((field.name().to_owned(), format!("{value:?}")));
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for SpanFields {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: layer::Context<'_, S>) {
            if attrs.metadata().name() == "delete_user" {
                attrs.record(&mut self.clone());
            }
        }
    }

    #[tokio::test]
    async fn test_span_records_id_and_yes_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/7"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let fields = SpanFields::default();
        let subscriber = tracing_subscriber::registry().with(fields.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let ctx = AppContext::new(BusinessConfig::new(server.uri()));
        assert!(run_delete(ctx, "7".to_owned(), true).await.is_err());

        let recorded = fields.0.lock().unwrap().clone();
        assert!(recorded.contains(&("yes".to_owned(), "true".to_owned())));
        assert!(recorded.contains(&("id".to_owned(), "\"7\"".to_owned())));
    }
}
