use anyhow::Result;
use httpmock::prelude::*;
use police_engagement::{
    ApiClient, ClientSettings, EngagementPipeline, ForceFilter, ForceSource, OutputFormat,
    PoliceApiError, SearchEngine, TomlConfig,
};
use serde_json::json;

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientSettings::default().with_base_url(server.base_url())).unwrap()
}

#[tokio::test]
async fn test_filters_numeric_ids_by_facebook() -> Result<()> {
    let server = MockServer::start();

    let forces_mock = server.mock(|when, then| {
        when.method(GET).path("/forces");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([{"id": 1}, {"id": 2}]));
    });
    let force_1_mock = server.mock(|when, then| {
        when.method(GET).path("/forces/1");
        then.status(200).json_body(json!({
            "id": 1,
            "engagement_methods": [{"type": "facebook", "url": "http://fb.com/x"}]
        }));
    });
    let force_2_mock = server.mock(|when, then| {
        when.method(GET).path("/forces/2");
        then.status(200).json_body(json!({
            "id": 2,
            "engagement_methods": [{"type": null, "url": null}]
        }));
    });

    let result = ForceFilter::new(client_for(&server))
        .forces_with_engagement_method("facebook")
        .await?;

    forces_mock.assert();
    force_1_mock.assert();
    force_2_mock.assert();
    assert_eq!(serde_json::to_value(&result)?, json!([{"id": 1}]));
    Ok(())
}

#[tokio::test]
async fn test_capitalized_target_matches_lowercase_value() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/forces");
        then.status(200)
            .json_body(json!([{"id": "north-wales", "name": "North Wales Police"}]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/forces/north-wales");
        then.status(200).json_body(json!({
            "id": "north-wales",
            "engagement_methods": [{"type": "facebook", "url": "https://www.facebook.com/northwalespolice"}]
        }));
    });

    let result = ForceFilter::new(client_for(&server))
        .forces_with_engagement_method("Facebook")
        .await?;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name(), Some("North Wales Police"));
    Ok(())
}

#[tokio::test]
async fn test_forces_listing_404_aborts_run() {
    let server = MockServer::start();
    let forces_mock = server.mock(|when, then| {
        when.method(GET).path("/forces");
        then.status(404);
    });

    let config = TomlConfig::from_toml_str(&format!(
        "[api]\nbase_url = \"{}\"\n",
        server.base_url()
    ))
    .unwrap();
    let engine = SearchEngine::new(EngagementPipeline::from_config(config).unwrap());

    let err = engine.run().await.unwrap_err();

    forces_mock.assert();
    match err {
        PoliceApiError::Api { path, status } => {
            assert_eq!(path, "/forces");
            assert_eq!(status, 404);
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_force_lookup_failure_aborts_without_partial_result() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/forces");
        then.status(200)
            .json_body(json!([{"id": "avon-and-somerset"}, {"id": "bedfordshire"}]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/forces/avon-and-somerset");
        then.status(200).json_body(json!({
            "engagement_methods": [{"type": "facebook"}]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/forces/bedfordshire");
        then.status(500);
    });

    let err = ForceFilter::new(client_for(&server))
        .forces_with_engagement_method("facebook")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "GET /forces/bedfordshire 500");
}

#[tokio::test]
async fn test_every_request_carries_json_content_type() -> Result<()> {
    let server = MockServer::start();
    let forces_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/forces")
            .header("Content-Type", "application/json");
        then.status(200).json_body(json!([{"id": "kent"}]));
    });
    let kent_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/forces/kent")
            .header("Content-Type", "application/json");
        then.status(200).json_body(json!({"engagement_methods": []}));
    });

    let client = client_for(&server);
    let forces = client.list_forces().await?;
    let methods = client.engagement_methods("kent").await?;

    forces_mock.assert();
    kent_mock.assert();
    assert_eq!(forces.len(), 1);
    assert!(methods.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_lookups_keep_listing_order() -> Result<()> {
    let server = MockServer::start();
    let ids = ["cumbria", "derbyshire", "dorset", "durham", "essex", "gwent"];

    let listing: Vec<_> = ids.iter().map(|id| json!({"id": id})).collect();
    server.mock(|when, then| {
        when.method(GET).path("/forces");
        then.status(200).json_body(serde_json::Value::Array(listing));
    });

    for (index, id) in ids.iter().enumerate() {
        let kind = if index % 2 == 0 { "facebook" } else { "twitter" };
        // earlier forces answer slower
        let delay = (ids.len() - index) as u64 * 20;
        server.mock(|when, then| {
            when.method(GET).path(format!("/forces/{}", id));
            then.status(200)
                .delay(std::time::Duration::from_millis(delay))
                .json_body(json!({"engagement_methods": [{"type": kind}]}));
        });
    }

    let result = ForceFilter::new(client_for(&server))
        .with_concurrency(4)
        .forces_with_engagement_method("facebook")
        .await?;

    let found: Vec<String> = result.iter().filter_map(|f| f.id()).collect();
    assert_eq!(found, vec!["cumbria", "dorset", "essex"]);
    Ok(())
}

#[tokio::test]
async fn test_engine_renders_report_from_toml_config() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/forces");
        then.status(200).json_body(json!([
            {"id": "kent", "name": "Kent Police"},
            {"id": "surrey", "name": "Surrey Police"}
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/forces/kent");
        then.status(200).json_body(json!({
            "engagement_methods": [{"type": "twitter", "url": "http://twitter.com/kent_police"}]
        }));
    });
    let surrey_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/forces/surrey")
            .header("X-Client", "police-engagement");
        then.status(200).json_body(json!({
            "engagement_methods": [{"type": "twitter", "url": "http://twitter.com/surreypolice"}]
        }));
    });

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[api]
base_url = "{}"

[api.headers]
X-Client = "police-engagement"

[search]
engagement_method = "twitter"
output_format = "csv"
"#,
        server.base_url()
    ))?;
    assert_eq!(
        police_engagement::ConfigProvider::output_format(&config),
        OutputFormat::Csv
    );

    let engine = SearchEngine::new(EngagementPipeline::from_config(config)?);
    let outcome = engine.run().await?;

    surrey_mock.assert();
    assert_eq!(outcome.engagement_method, "twitter");
    assert_eq!(outcome.forces_listed, 2);
    assert_eq!(outcome.matching_forces.len(), 2);
    assert_eq!(outcome.report, "id,name\nkent,Kent Police\nsurrey,Surrey Police");
    Ok(())
}

#[tokio::test]
async fn test_engine_with_no_matches_renders_empty_table() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/forces");
        then.status(200).json_body(json!([{"id": "kent", "name": "Kent Police"}]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/forces/kent");
        then.status(200).json_body(json!({"engagement_methods": []}));
    });

    let config =
        TomlConfig::from_toml_str(&format!("[api]\nbase_url = \"{}\"\n", server.base_url()))?;
    let outcome = SearchEngine::new(EngagementPipeline::from_config(config)?)
        .run()
        .await?;

    assert!(outcome.matching_forces.is_empty());
    assert_eq!(outcome.report, "Empty result");
    Ok(())
}
