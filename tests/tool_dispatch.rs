mod common;
use common::{MockUpstream, ENV_LOCK};

use aap_mcp::app::App;
use aap_mcp::services::config::AapConfig;
use aap_mcp::services::logger::{LogLevel, Logger};
use serde_json::{json, Value};

fn quiet() -> Logger {
    Logger::with_level("test", LogLevel::Error)
}

fn app_for(upstream: &MockUpstream) -> App {
    let config = AapConfig::new(upstream.base_url.clone(), "test-token")
        .expect("config")
        .with_max_retries(1);
    App::initialize(config, quiet()).expect("app")
}

#[tokio::test]
async fn get_job_templates_renders_upstream_listing() {
    let upstream = MockUpstream::start(vec![(
        "/api/controller/v2/job_templates/",
        200,
        json!({
            "count": 1,
            "results": [{
                "id": 1,
                "name": "Deploy",
                "description": "Rolls out the app",
                "project": 5,
                "playbook": "deploy.yml",
                "inventory": 2,
                "extra_vars": "",
                "survey_enabled": true
            }]
        })
        .to_string(),
    )])
    .await;
    let app = app_for(&upstream);

    let text = app
        .tool_executor
        .execute("get_job_templates", json!({}))
        .await;
    assert!(text.contains("Found 1 job template:"), "{}", text);
    assert!(text.contains("ID: 1"));
    assert!(text.contains("\"playbook\": \"deploy.yml\""));
    assert!(text.contains("   🗂️  Inventory: 2\n"));
    assert!(text.contains("   📝 Survey Enabled: Yes\n"));

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert!(requests[0].query.contains("page_size=200"));
    assert!(!requests[0].query.contains("project="));
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer test-token")
    );
}

#[tokio::test]
async fn launch_posts_only_supplied_fields() {
    let upstream = MockUpstream::start(vec![(
        "/api/controller/v2/job_templates/7/launch/",
        201,
        json!({"job": 123, "id": 456, "type": "job", "url": "/api/controller/v2/jobs/123/"})
            .to_string(),
    )])
    .await;
    let app = app_for(&upstream);

    let text = app
        .tool_executor
        .execute(
            "launch_job_template",
            json!({"template_id": 7, "inventory": 3, "limit": "web01"}),
        )
        .await;
    assert_eq!(
        text,
        "Job launched successfully!\n\nJob ID: 123\nLaunch ID: 456\nURL: /api/controller/v2/jobs/123/\nType: job\n\nUse get_job_status to check the job progress."
    );

    let requests = upstream.requests();
    assert_eq!(requests[0].method, "POST");
    let body = requests[0].json_body();
    let mut keys: Vec<&String> = body.as_object().expect("object").keys().collect();
    keys.sort();
    assert_eq!(keys, vec!["inventory", "limit"]);
    assert_eq!(body["inventory"], 3);
}

#[tokio::test]
async fn upstream_errors_come_back_as_error_text() {
    let upstream = MockUpstream::start(vec![(
        "/api/controller/v2/jobs/9/",
        500,
        "boom".to_string(),
    )])
    .await;
    let app = app_for(&upstream);

    let text = app
        .tool_executor
        .execute("get_job_status", json!({"job_id": 9}))
        .await;
    assert_eq!(
        text,
        "Error: AAP API request failed after 1 attempt: 500 - boom"
    );
}

#[tokio::test]
async fn launch_redirect_is_reported_as_failure() {
    let upstream = MockUpstream::start_with_headers(vec![
        (
            "/api/controller/v2/job_templates/7/launch/",
            302,
            vec![("Location", "/api/controller/v2/elsewhere/")],
            String::new(),
        ),
        (
            "/api/controller/v2/elsewhere/",
            200,
            Vec::new(),
            json!({"job": 1, "id": 1, "status": "pending"}).to_string(),
        ),
    ])
    .await;
    let app = app_for(&upstream);

    let text = app
        .tool_executor
        .execute("launch_job_template", json!({"template_id": 7, "limit": "web"}))
        .await;
    assert!(
        text.starts_with("Error: AAP API request failed after 1 attempt: 302"),
        "{}",
        text
    );

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/controller/v2/job_templates/7/launch/");
}

#[tokio::test]
async fn silent_upstream_times_out() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    let config = AapConfig::new(format!("http://{}", addr), "test-token")
        .expect("config")
        .with_max_retries(1)
        .with_timeout_secs(1);
    let app = App::initialize(config, quiet()).expect("app");

    let text = app
        .tool_executor
        .execute("get_job_status", json!({"job_id": 9}))
        .await;
    assert!(
        text.starts_with("Error: AAP API request failed after 1 attempt: request timed out"),
        "{}",
        text
    );
}

#[tokio::test]
async fn job_output_is_plain_text() {
    let upstream = MockUpstream::start(vec![(
        "/api/controller/v2/jobs/4/stdout/",
        200,
        "PLAY RECAP\nweb01 : ok=3".to_string(),
    )])
    .await;
    let app = app_for(&upstream);

    let text = app
        .tool_executor
        .execute("get_job_output", json!({"job_id": 4}))
        .await;
    assert_eq!(
        text,
        "Job Output (Job ID: 4):\n\n```\nPLAY RECAP\nweb01 : ok=3\n```"
    );
    assert!(upstream.requests()[0].query.contains("format=txt"));
}

#[tokio::test]
async fn inventories_fan_out_per_inventory() {
    let upstream = MockUpstream::start(vec![
        (
            "/api/controller/v2/inventories/",
            200,
            json!({"results": [{"id": 1, "name": "prod"}, {"id": 2, "name": "stage"}]}).to_string(),
        ),
        (
            "/api/controller/v2/inventories/1/hosts/",
            200,
            json!({"results": [{"id": 11, "name": "web01", "description": "frontend", "enabled": true}]})
                .to_string(),
        ),
        (
            "/api/controller/v2/inventories/2/hosts/",
            200,
            json!({"results": [{"id": 21, "name": "web02", "enabled": false}]}).to_string(),
        ),
    ])
    .await;
    let app = app_for(&upstream);

    let text = app
        .tool_executor
        .execute("get_host_inventories", json!({}))
        .await;
    assert!(text.starts_with("Found 2 inventories:"));
    assert!(text.contains("              Description : frontend\n"));
    assert!(text.contains("   - Host 1: web02\n              Enabled     : No\n"));

    let paths: Vec<String> = upstream.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths.len(), 3);
    assert_eq!(paths[1], "/api/controller/v2/inventories/1/hosts/");
    assert_eq!(paths[2], "/api/controller/v2/inventories/2/hosts/");
}

#[tokio::test]
async fn connection_test_reports_failure_without_error_prefix() {
    let upstream = MockUpstream::start(vec![(
        "/api/controller/v2/me/",
        401,
        r#"{"detail":"Authentication credentials were not provided."}"#.to_string(),
    )])
    .await;
    let app = app_for(&upstream);

    let text = app
        .tool_executor
        .execute("test_aap_connection", Value::Null)
        .await;
    assert!(text.starts_with("AAP Connection Test: ❌ FAILED\n\n"));
    assert!(text.contains(&format!("URL: {}", upstream.base_url)));
}

#[tokio::test]
async fn schema_and_unknown_tool_errors_render_as_text() {
    let upstream = MockUpstream::start(vec![]).await;
    let app = app_for(&upstream);

    let missing = app
        .tool_executor
        .execute("launch_job_template", json!({}))
        .await;
    assert!(missing.starts_with("Error: Invalid arguments for launch_job_template"));
    assert!(missing.contains("template_id"));

    let unknown = app.tool_executor.execute("delete_job", json!({})).await;
    assert_eq!(unknown, "Unknown tool: delete_job");
    assert!(upstream.requests().is_empty());
}

#[tokio::test]
async fn environment_config_without_credentials_errors_per_call() {
    let _guard = ENV_LOCK.lock().await;

    let prev_url = std::env::var("AAP_URL").ok();
    let prev_token = std::env::var("AAP_TOKEN").ok();
    std::env::remove_var("AAP_URL");
    std::env::remove_var("AAP_TOKEN");

    let config = AapConfig::from_env().expect("loads");
    let app = App::initialize(config, quiet()).expect("app still starts");
    let text = app
        .tool_executor
        .execute("get_organizations", json!({}))
        .await;
    assert_eq!(text, "Error: AAP_URL and AAP_TOKEN must be configured");

    if let Some(value) = prev_url {
        std::env::set_var("AAP_URL", value);
    }
    if let Some(value) = prev_token {
        std::env::set_var("AAP_TOKEN", value);
    }
}
