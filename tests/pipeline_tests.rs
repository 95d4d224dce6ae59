//! End-to-end pipeline tests against a local mock of the Koios API
//!
//! Each test binds an axum router on an ephemeral port, points the client
//! at it via the base-URL override, and runs the real pipeline into a
//! temporary output directory.

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use drep_history::config::ReportConfig;
use drep_history::error::Error;
use drep_history::services::koios_client::{KoiosClient, KoiosError};
use drep_history::services::metadata_resolver::MetadataResolver;
use drep_history::services::pipeline;
use serde_json::{json, Value};
use std::fs;

const T_2023: i64 = 1_672_531_200; // 2023-01-01T00:00:00Z
const T_2024_EARLY: i64 = 1_704_067_200; // 2024-01-01T00:00:00Z
const T_2024_LATE: i64 = 1_718_409_600; // 2024-06-15T00:00:00Z

/// Bind `router` on an ephemeral local port and return its base URL
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Mock of the two Koios endpoints the pipeline consumes
fn koios_router(proposals: Value, votes: Value) -> Router {
    Router::new()
        .route(
            "/voter_proposal_list",
            get(move || {
                let body = proposals.clone();
                async move { Json(body) }
            }),
        )
        .route(
            "/drep_votes",
            get(move || {
                let body = votes.clone();
                async move { Json(body) }
            }),
        )
}

fn test_config() -> ReportConfig {
    ReportConfig {
        drep_id: "drep1abc".to_string(),
        organization_name: "Example Org".to_string(),
        api_key: "test-key".to_string(),
    }
}

async fn run_against(
    base_url: &str,
    output: &std::path::Path,
) -> drep_history::Result<pipeline::RunSummary> {
    let config = test_config();
    let client = KoiosClient::with_base_url(config.api_key.clone(), base_url).unwrap();
    let resolver = MetadataResolver::new().unwrap();
    pipeline::run(&config, &client, &resolver, output).await
}

#[tokio::test]
async fn test_end_to_end_two_votes_two_years() {
    let meta_base = serve(Router::new().route(
        "/meta.jsonld",
        get(|| async { Json(json!({"body": {"comment": "Line1\nLine2 | extra"}})) }),
    ))
    .await;

    let proposals = json!([
        {
            "proposal_id": "gov_action_first",
            "proposal_type": "InfoAction",
            "proposed_epoch": 450,
            "expiration": 457,
            "meta_json": {"body": {"title": "First Proposal"}}
        },
        {
            "proposal_id": "gov_action_second",
            "proposal_type": "TreasuryWithdrawals",
            "proposed_epoch": 500,
            "expiration": 507,
            "meta_json": {"body": {"title": "Second Proposal"}}
        }
    ]);
    let votes = json!([
        {
            "proposal_id": "gov_action_first",
            "proposal_tx_hash": "aa11",
            "proposal_index": 0,
            "vote_tx_hash": "bb22",
            "block_time": T_2023,
            "vote": "Yes",
            "meta_url": format!("{}/meta.jsonld", meta_base),
            "meta_hash": "cc33"
        },
        {
            "proposal_id": "gov_action_second",
            "proposal_tx_hash": "dd44",
            "proposal_index": 0,
            "vote_tx_hash": "ee55",
            "block_time": T_2024_LATE,
            "vote": "No"
        }
    ]);

    let koios_base = serve(koios_router(proposals, votes)).await;
    let out = tempfile::tempdir().unwrap();

    let summary = run_against(&koios_base, out.path()).await.unwrap();

    assert_eq!(summary.proposals_indexed, 2);
    assert_eq!(summary.votes_fetched, 2);
    assert_eq!(summary.votes_dropped, 0);
    assert_eq!(summary.files_written, 2);

    let y2023 = fs::read_to_string(out.path().join("2023").join("2023-votes.md")).unwrap();
    let y2024 = fs::read_to_string(out.path().join("2024").join("2024-votes.md")).unwrap();

    // One block per year, correct glyphs
    assert_eq!(y2023.matches("Cardano Governance Actions").count(), 1);
    assert_eq!(y2024.matches("Cardano Governance Actions").count(), 1);
    assert!(y2023.contains("| Vote | ✅Yes |"));
    assert!(y2024.contains("| Vote | ❌No |"));

    // Proposal join and display hash suffix
    assert!(y2023.contains("[First Proposal](https://adastat.net/governances/aa1100)"));
    assert!(y2024.contains("[Second Proposal](https://adastat.net/governances/dd4400)"));

    // Rationale fetched, sanitized; absent metadata renders placeholder
    assert!(y2023.contains("| Rationale | Line1 Line2 \\| extra |"));
    assert!(y2024.contains("| Rationale | No rationale available |"));
}

#[tokio::test]
async fn test_proposal_index_failure_degrades_to_placeholders() {
    // Non-array response from voter_proposal_list is not fatal
    let proposals = json!({"error": "temporarily unavailable"});
    let votes = json!([
        {
            "proposal_id": "gov_action_first",
            "proposal_tx_hash": "aa11",
            "vote_tx_hash": "bb22",
            "block_time": T_2024_LATE,
            "vote": "Yes"
        }
    ]);

    let koios_base = serve(koios_router(proposals, votes)).await;
    let out = tempfile::tempdir().unwrap();

    let summary = run_against(&koios_base, out.path()).await.unwrap();

    assert_eq!(summary.proposals_indexed, 0);
    assert_eq!(summary.files_written, 1);

    let y2024 = fs::read_to_string(out.path().join("2024").join("2024-votes.md")).unwrap();
    assert!(y2024.contains("[Unknown Proposal]"));
    assert!(y2024.contains("| Type | Unknown |"));
}

#[tokio::test]
async fn test_vote_list_non_array_is_fatal() {
    let proposals = json!([]);
    let votes = json!({"error": "temporarily unavailable"});

    let koios_base = serve(koios_router(proposals, votes)).await;
    let out = tempfile::tempdir().unwrap();

    let err = run_against(&koios_base, out.path()).await.unwrap_err();
    assert!(matches!(err, Error::Koios(KoiosError::NotAnArray)));
}

#[tokio::test]
async fn test_vote_list_server_error_is_fatal() {
    let router = Router::new()
        .route("/voter_proposal_list", get(|| async { Json(json!([])) }))
        .route(
            "/drep_votes",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );

    let koios_base = serve(router).await;
    let out = tempfile::tempdir().unwrap();

    let err = run_against(&koios_base, out.path()).await.unwrap_err();
    assert!(matches!(err, Error::Koios(KoiosError::Api(500, _))));
}

#[tokio::test]
async fn test_invalid_vote_records_dropped_rest_processed() {
    let votes = json!([
        {"proposal_tx_hash": "no-id", "block_time": T_2024_LATE, "vote": "Yes"},
        {"proposal_id": "gov_action_1", "block_time": T_2024_LATE},
        {"proposal_id": "gov_action_2", "vote": "Yes"},
        {"proposal_id": "gov_action_3", "block_time": T_2024_LATE, "vote": "Definitely"},
        {"proposal_id": "gov_action_4", "block_time": T_2024_LATE, "vote": "Abstain"}
    ]);

    let koios_base = serve(koios_router(json!([]), votes)).await;
    let out = tempfile::tempdir().unwrap();

    let summary = run_against(&koios_base, out.path()).await.unwrap();

    assert_eq!(summary.votes_fetched, 5);
    assert_eq!(summary.votes_dropped, 4);
    assert_eq!(summary.files_written, 1);

    let y2024 = fs::read_to_string(out.path().join("2024").join("2024-votes.md")).unwrap();
    assert_eq!(y2024.matches("Cardano Governance Actions").count(), 1);
    assert!(y2024.contains("| Action ID | gov_action_4 |"));
    assert!(y2024.contains("| Vote | ⚪Abstain |"));
}

#[tokio::test]
async fn test_metadata_failure_tolerated_per_vote() {
    let meta_base = serve(Router::new().route(
        "/good.jsonld",
        get(|| async { Json(json!({"body": {"rationale": "still here"}})) }),
    ))
    .await;

    let votes = json!([
        {
            "proposal_id": "gov_action_broken_meta",
            "block_time": T_2024_LATE,
            "vote": "Yes",
            "meta_url": format!("{}/missing.jsonld", meta_base)
        },
        {
            "proposal_id": "gov_action_good_meta",
            "block_time": T_2024_EARLY,
            "vote": "No",
            "meta_url": format!("{}/good.jsonld", meta_base)
        }
    ]);

    let koios_base = serve(koios_router(json!([]), votes)).await;
    let out = tempfile::tempdir().unwrap();

    let summary = run_against(&koios_base, out.path()).await.unwrap();
    assert_eq!(summary.votes_dropped, 0);

    let y2024 = fs::read_to_string(out.path().join("2024").join("2024-votes.md")).unwrap();

    // The failed fetch renders the placeholder; the next vote still resolves
    assert!(y2024.contains("| Rationale | No rationale available |"));
    assert!(y2024.contains("| Rationale | still here |"));
}

#[tokio::test]
async fn test_votes_within_year_render_newest_first() {
    let votes = json!([
        {"proposal_id": "gov_action_early", "block_time": T_2024_EARLY, "vote": "Yes"},
        {"proposal_id": "gov_action_late", "block_time": T_2024_LATE, "vote": "Yes"}
    ]);

    let koios_base = serve(koios_router(json!([]), votes)).await;
    let out = tempfile::tempdir().unwrap();

    run_against(&koios_base, out.path()).await.unwrap();

    let y2024 = fs::read_to_string(out.path().join("2024").join("2024-votes.md")).unwrap();
    let late_pos = y2024.find("gov_action_late").unwrap();
    let early_pos = y2024.find("gov_action_early").unwrap();
    assert!(late_pos < early_pos, "newer vote must precede older vote");
}
