//! Integration tests for the console API client using wiremock
//!
//! These tests verify request construction and response shaping against
//! mocked backend endpoints: path namespacing, permission merging, binary
//! exports and failure propagation.

use dbconsole_api::client::ApiClient;
use dbconsole_api::params::{
    ClusterListParams, ExportClusterParams, InstanceListParams,
};
use dbconsole_api::resource::{kafka, permission, tendbha};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, biz_id: u64) -> ApiClient {
    ApiClient::new(&server.uri(), biz_id).expect("client should build")
}

mod list_shaping {
    use super::*;

    /// Envelope defaults are merged into every item, item flags winning
    #[tokio::test]
    async fn cluster_list_merges_envelope_permissions() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apis/bigdata/bizs/3/kafka/kafka_resources/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "permission": {"view": true, "edit": false},
                "results": [
                    {"id": 1, "domain": "kafka-a.example", "permission": {"edit": true}},
                    {"id": 2, "domain": "kafka-b.example"}
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let listed = kafka::cluster_list(&client, &ClusterListParams::default())
            .await
            .expect("List should succeed");

        assert_eq!(listed.count, 2);

        let first = &listed.results[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.permission["view"], true);
        assert_eq!(first.permission["edit"], true);

        let second = &listed.results[1];
        assert_eq!(second.id, 2);
        assert_eq!(second.permission["view"], true);
        assert_eq!(second.permission["edit"], false);
    }

    /// Backend ordering survives shaping untouched
    #[tokio::test]
    async fn cluster_list_preserves_backend_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apis/bigdata/bizs/3/kafka/kafka_resources/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 3,
                "results": [{"id": 5}, {"id": 1}, {"id": 3}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let listed = kafka::cluster_list(&client, &ClusterListParams::default())
            .await
            .expect("List should succeed");

        let ids: Vec<u64> = listed.results.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 1, 3]);
    }

    /// An explicit business id overrides the client default in the path
    #[tokio::test]
    async fn explicit_biz_id_overrides_client_default() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apis/bigdata/bizs/9/kafka/kafka_resources/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 0,
                "results": []
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let params = ClusterListParams {
            bk_biz_id: Some(9),
            ..Default::default()
        };
        let listed = kafka::cluster_list(&client, &params)
            .await
            .expect("List should succeed");

        assert!(listed.results.is_empty());
    }

    /// One malformed record fails the whole call, not just that record
    #[tokio::test]
    async fn malformed_record_fails_entire_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apis/bigdata/bizs/3/kafka/kafka_resources/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "results": [{"id": 1}, {"id": "not-a-number"}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let listed = kafka::cluster_list(&client, &ClusterListParams::default()).await;
        assert!(listed.is_err());
    }

    /// Sub-resource listing carries the parent id in the path and still
    /// resolves envelope permissions onto every node
    #[tokio::test]
    async fn node_list_routes_under_parent_cluster() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apis/bigdata/bizs/3/kafka/kafka_resources/5/list_nodes/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "permission": {"access_entry_view": true},
                "results": [
                    {"bk_host_id": 101, "ip": "10.0.0.1", "role": "broker"},
                    {"bk_host_id": 102, "ip": "10.0.0.2", "role": "zookeeper"}
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let nodes = kafka::node_list(&client, 5, &InstanceListParams::default())
            .await
            .expect("Node list should succeed");

        assert_eq!(nodes.results.len(), 2);
        assert_eq!(nodes.results[0].ip, "10.0.0.1");
        assert!(nodes.results.iter().all(|n| n.permission["access_entry_view"]));
    }

    /// The slave-entry listing surfaces each record under its slave domain
    #[tokio::test]
    async fn slave_list_promotes_slave_domain() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apis/mysql/bizs/3/tendbha_resources/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "results": [{
                    "id": 1,
                    "master_domain": "master.db.example",
                    "slave_domain": "slave.db.example"
                }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let listed = tendbha::slave_list(&client, &ClusterListParams::default())
            .await
            .expect("Slave list should succeed");

        assert_eq!(listed.results[0].master_domain, "slave.db.example");
        assert_eq!(listed.results[0].slave_domain, "slave.db.example");
    }
}

mod detail_and_export {
    use super::*;

    /// A detail call builds exactly one model from the single record
    #[tokio::test]
    async fn cluster_detail_builds_one_model() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apis/mysql/bizs/3/tendbha_resources/7/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "cluster_name": "x"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let detail = tendbha::cluster_detail(&client, 7)
            .await
            .expect("Detail should succeed");

        assert_eq!(detail.id, 7);
        assert_eq!(detail.cluster_name, "x");
    }

    /// Export payloads come back byte-for-byte, never JSON decoded
    #[tokio::test]
    async fn export_returns_raw_payload() {
        let server = MockServer::start().await;

        let payload: &[u8] = b"PK\x03\x04 not json at all \x00\x01\x02";
        Mock::given(method("POST"))
            .and(path("/apis/bigdata/bizs/3/kafka/kafka_resources/export_cluster/"))
            .and(body_json(json!({"cluster_ids": [1, 2]})))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(payload, "application/octet-stream"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let params = ExportClusterParams {
            cluster_ids: Some(vec![1, 2]),
        };
        let blob = kafka::export_cluster(&client, &params)
            .await
            .expect("Export should succeed");

        assert_eq!(blob.as_ref(), payload);
    }
}

mod permission_family {
    use super::*;

    /// Account-rule listing routes under the MySQL permission namespace
    #[tokio::test]
    async fn account_rules_list_is_shaped_and_filtered() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apis/mysql/bizs/3/permission/account/list_account_rules/"))
            .and(query_param("user", "tom"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "permission": {"mysql_account_delete": false},
                "results": [{
                    "account": {"account_id": 11, "user": "tom"},
                    "rules": [{"rule_id": 4, "access_db": "orders", "privilege": "select"}]
                }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let params = permission::AccountRulesParams {
            user: Some("tom".to_string()),
            ..Default::default()
        };
        let listed = permission::account_rules(&client, &params)
            .await
            .expect("List should succeed");

        let item = &listed.results[0];
        assert_eq!(item.account.user, "tom");
        assert_eq!(item.rules[0].access_db, "orders");
        assert_eq!(item.permission["mysql_account_delete"], false);
    }

    /// Deletions go out parameter encoded, not body encoded
    #[tokio::test]
    async fn delete_account_sends_query_params() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/apis/mysql/bizs/3/permission/account/delete_account/"))
            .and(query_param("account_id", "11"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let params = permission::DeleteAccountParams {
            bk_biz_id: None,
            account_id: 11,
            account_type: None,
        };
        permission::delete_account(&client, &params)
            .await
            .expect("Delete should succeed");
    }

    /// Policy endpoints live under the global configuration namespace
    #[tokio::test]
    async fn password_policy_decodes_typed_rules() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apis/conf/password_policy/get_password_policy/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "name": "default",
                "rule": {
                    "min_length": 8,
                    "max_length": 32,
                    "include_rule": {"numbers": true, "symbols": false,
                                     "lowercase": true, "uppercase": true},
                    "exclude_continuous_rule": {"limit": 4, "letters": true,
                                                "numbers": true, "symbols": false,
                                                "keyboards": true, "repeats": true}
                }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let policy = permission::password_policy(&client)
            .await
            .expect("Policy fetch should succeed");

        assert_eq!(policy.rule.min_length, 8);
        assert!(policy.rule.include_rule.numbers);
        assert_eq!(policy.rule.exclude_continuous_rule.limit, 4);
    }

    /// The add-rule precheck routes under an explicitly chosen business
    #[tokio::test]
    async fn add_rule_precheck_honors_explicit_biz() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(
                "/apis/mysql/bizs/9/permission/account/pre_check_add_account_rule/",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "force_run": true,
                "warning": "rule overlaps an existing grant"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let params = permission::PrecheckAccountRuleParams {
            bk_biz_id: Some(9),
            account_id: Some(1),
            access_db: "orders".to_string(),
            privilege: permission::RulePrivilege::default(),
            account_type: None,
        };
        let verdict = permission::precheck_add_account_rule(&client, &params)
            .await
            .expect("Precheck should succeed");

        assert!(verdict.force_run);
        assert!(verdict.warning.is_some());
    }

    /// Precheck verdicts decode from the write response
    #[tokio::test]
    async fn clone_precheck_round_trip() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/apis/mysql/bizs/3/permission/clone/pre_check_clone/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pre_check": false,
                "message": "target already holds grants",
                "clone_uid": "uid-123"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let params = permission::PermissionCloneParams {
            bk_biz_id: None,
            clone_type: permission::CloneType::Instance,
            clone_list: vec![permission::CloneEntry {
                source: "10.0.0.1:3306".to_string(),
                target: "10.0.0.2:3306".to_string(),
            }],
            clone_cluster_type: "mysql".to_string(),
        };
        let verdict = permission::precheck_permission_clone(&client, &params)
            .await
            .expect("Precheck should succeed");

        assert!(!verdict.pre_check);
        assert_eq!(verdict.clone_uid, "uid-123");
    }
}

mod failures {
    use super::*;

    /// Non-success statuses surface as errors with no retry
    #[tokio::test]
    async fn server_error_propagates_to_caller() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apis/bigdata/bizs/3/kafka/kafka_resources/"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": "internal"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let listed = kafka::cluster_list(&client, &ClusterListParams::default()).await;

        assert!(listed.is_err());
        let message = format!("{:#}", listed.unwrap_err());
        assert!(message.contains("500"));
    }

    /// Error bodies are never parsed as payloads
    #[tokio::test]
    async fn export_failure_does_not_return_bytes() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/apis/bigdata/bizs/3/kafka/kafka_resources/export_cluster/"))
            .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
            .mount(&server)
            .await;

        let client = client_for(&server, 3);
        let blob = kafka::export_cluster(&client, &ExportClusterParams::default()).await;
        assert!(blob.is_err());
    }
}
