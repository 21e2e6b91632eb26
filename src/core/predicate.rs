use crate::domain::model::EngagementMethod;
use crate::domain::ports::ForceSource;
use crate::utils::error::Result;

/// True when any string value across `methods` contains `method`,
/// ignoring case.
///
/// Every field is scanned rather than only `type`: not all forces fill
/// `type` in, but the platform usually shows up in the url or title.
pub fn matches_engagement_method(methods: &[EngagementMethod], method: &str) -> bool {
    let needle = method.to_lowercase();
    methods
        .iter()
        .flat_map(|m| m.string_values())
        .any(|value| value.to_lowercase().contains(&needle))
}

pub async fn has_social_engagement_method<S: ForceSource + ?Sized>(
    source: &S,
    force_id: &str,
    method: &str,
) -> Result<bool> {
    let methods = source.engagement_methods(force_id).await?;
    let found = matches_engagement_method(&methods, method);
    tracing::debug!(
        "Force '{}': {} engagement methods, has '{}': {}",
        force_id,
        methods.len(),
        method,
        found
    );
    Ok(found)
}
