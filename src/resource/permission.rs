//! Password policy and account-rule management
//!
//! Two backend namespaces feed this family: the global password-policy
//! configuration endpoints under `/apis/conf/` and the per-business MySQL
//! permission endpoints (accounts, rules, authorization prechecks, clones).

use crate::client::ApiClient;
use crate::envelope::{shape_item, shape_list, ListResponse, PermissionMap};
use crate::params::NO_PARAMS;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const ACCOUNT: &str = "permission/account";
const AUTHORIZE: &str = "permission/authorize";
const CLONE: &str = "permission/clone";

// =========================================================================
// Password policy
// =========================================================================

/// Password security policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordPolicy {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rule: PasswordRule,
}

/// Composition rules enforced by the password policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordRule {
    #[serde(default)]
    pub min_length: u32,
    #[serde(default)]
    pub max_length: u32,
    #[serde(default)]
    pub include_rule: PasswordIncludeRule,
    #[serde(default)]
    pub exclude_continuous_rule: PasswordContinuousRule,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordIncludeRule {
    #[serde(default)]
    pub numbers: bool,
    #[serde(default)]
    pub symbols: bool,
    #[serde(default)]
    pub lowercase: bool,
    #[serde(default)]
    pub uppercase: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordContinuousRule {
    /// Maximum run length before a sequence counts as continuous
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub letters: bool,
    #[serde(default)]
    pub numbers: bool,
    #[serde(default)]
    pub symbols: bool,
    #[serde(default)]
    pub keyboards: bool,
    #[serde(default)]
    pub repeats: bool,
}

/// Password randomization schedule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomCycle {
    pub crontab: Crontab,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Crontab {
    #[serde(default)]
    pub minute: String,
    #[serde(default)]
    pub hour: String,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub day_of_month: String,
}

/// Which credential class a random password is generated for
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityType {
    Password,
    RedisPassword,
}

/// Result of a password strength check
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordStrength {
    #[serde(default)]
    pub is_strength: bool,
    #[serde(default)]
    pub password_verify_info: PasswordVerifyInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordVerifyInfo {
    #[serde(default)]
    pub number_of_types_valid: bool,
    #[serde(default)]
    pub allowed_valid: bool,
    #[serde(default)]
    pub out_of_range: String,
    #[serde(default)]
    pub repeats_valid: bool,
    #[serde(default)]
    pub follow_keyboards_valid: bool,
    #[serde(default)]
    pub follow_letters_valid: bool,
    #[serde(default)]
    pub follow_numbers_valid: bool,
    #[serde(default)]
    pub follow_symbols_valid: bool,
    #[serde(default)]
    pub min_length_valid: bool,
    #[serde(default)]
    pub max_length_valid: bool,
}

/// Fetch the current password security policy
pub async fn password_policy(client: &ApiClient) -> Result<PasswordPolicy> {
    let path = client.conf_path("password_policy/get_password_policy/");
    let raw = client.read(&path, NO_PARAMS).await?;
    shape_item(raw)
}

/// Replace the password security policy
pub async fn update_password_policy(client: &ApiClient, policy: &PasswordPolicy) -> Result<()> {
    let path = client.conf_path("password_policy/update_password_policy/");
    client.write(&path, policy).await?;
    Ok(())
}

/// Fetch the password randomization schedule
pub async fn random_cycle(client: &ApiClient) -> Result<RandomCycle> {
    let path = client.conf_path("password_policy/query_random_cycle/");
    let raw = client.read(&path, NO_PARAMS).await?;
    shape_item(raw)
}

/// Replace the password randomization schedule
pub async fn modify_random_cycle(client: &ApiClient, cycle: &RandomCycle) -> Result<()> {
    let path = client.conf_path("password_policy/modify_random_cycle/");
    client.write(&path, cycle).await?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct RandomPasswordParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    security_type: Option<SecurityType>,
}

#[derive(Debug, Deserialize)]
struct RandomPasswordResponse {
    password: String,
}

/// Generate a password satisfying the current policy
pub async fn random_password(
    client: &ApiClient,
    security_type: Option<SecurityType>,
) -> Result<String> {
    let path = client.conf_path("password_policy/get_random_password/");
    let raw = client.read(&path, &RandomPasswordParams { security_type }).await?;
    let response: RandomPasswordResponse = shape_item(raw)?;
    Ok(response.password)
}

/// Check a candidate password against the current policy
pub async fn verify_password_strength(
    client: &ApiClient,
    password: &str,
) -> Result<PasswordStrength> {
    let path = client.conf_path("password_policy/verify_password_strength/");
    let body = serde_json::json!({ "password": password });
    let raw = client.write(&path, &body).await?;
    shape_item(raw)
}

// =========================================================================
// Admin passwords
// =========================================================================

/// One instance targeted by an admin-password rotation
#[derive(Debug, Clone, Serialize)]
pub struct AdminPasswordInstance {
    pub ip: String,
    pub port: u16,
    pub bk_cloud_id: u64,
    pub cluster_type: String,
    pub role: String,
}

/// Request to rotate the admin password on a set of instances
#[derive(Debug, Clone, Serialize)]
pub struct ModifyAdminPasswordParams {
    /// Hours the new password stays locked against re-randomization
    pub lock_hour: u64,
    pub password: String,
    pub instance_list: Vec<AdminPasswordInstance>,
}

/// Per-cluster outcome of an admin-password rotation
#[derive(Debug, Clone, Deserialize)]
pub struct AdminPasswordResultItem {
    #[serde(default)]
    pub bk_cloud_id: u64,
    #[serde(default)]
    pub cluster_type: String,
    #[serde(default)]
    pub instances: Vec<AdminPasswordResultInstance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminPasswordResultInstance {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub addresses: Vec<InstanceAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstanceAddress {
    pub ip: String,
    pub port: u16,
}

/// Split outcome of an admin-password rotation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModifyAdminPasswordResult {
    #[serde(default)]
    pub success: Option<Vec<AdminPasswordResultItem>>,
    #[serde(default)]
    pub fail: Option<Vec<AdminPasswordResultItem>>,
}

/// Filters for the effective admin-password listing
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminPasswordQueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Comma-joined `ip:port` filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<String>,
    pub db_type: String,
}

/// One effective admin password record
#[derive(Debug, Clone, Deserialize)]
pub struct AdminPassword {
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub bk_cloud_id: u64,
    #[serde(default)]
    pub cluster_type: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub lock_until: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub update_time: String,
    #[serde(default)]
    pub permission: PermissionMap,
}

/// Rotate the admin password on the given instances
pub async fn modify_admin_password(
    client: &ApiClient,
    params: &ModifyAdminPasswordParams,
) -> Result<ModifyAdminPasswordResult> {
    let path = client.conf_path("password_policy/modify_admin_password/");
    let raw = client.write(&path, params).await?;
    shape_item(raw)
}

/// List effective admin passwords with merged permissions
pub async fn query_admin_password(
    client: &ApiClient,
    params: &AdminPasswordQueryParams,
) -> Result<ListResponse<AdminPassword>> {
    let path = client.conf_path("password_policy/query_admin_password/");
    let raw = client.write(&path, params).await?;
    shape_list(raw)
}

// =========================================================================
// Accounts and rules
// =========================================================================

/// Privilege buckets attached to an account rule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulePrivilege {
    #[serde(default)]
    pub dml: Vec<String>,
    #[serde(default)]
    pub ddl: Vec<String>,
    #[serde(default)]
    pub glob: Vec<String>,
}

/// Account identity as the backend stores it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub account_id: u64,
    #[serde(default)]
    pub bk_biz_id: u64,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub create_time: String,
}

/// One rule granting an account access to a database
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountRuleInfo {
    #[serde(default)]
    pub rule_id: u64,
    #[serde(default)]
    pub account_id: u64,
    #[serde(default)]
    pub access_db: String,
    #[serde(default)]
    pub privilege: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub create_time: String,
}

/// One account together with its rules, as listed by the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionAccount {
    #[serde(default)]
    pub account: AccountInfo,
    #[serde(default)]
    pub rules: Vec<AccountRuleInfo>,
    #[serde(default)]
    pub permission: PermissionMap,
}

/// Filters for the account-rule listing
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountRulesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_biz_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_db: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

/// List accounts and their rules with merged permissions
pub async fn account_rules(
    client: &ApiClient,
    params: &AccountRulesParams,
) -> Result<ListResponse<PermissionAccount>> {
    let biz = client.resolve_biz(params.bk_biz_id);
    let path = client.mysql_path(biz, &format!("{}/list_account_rules/", ACCOUNT));
    let raw = client.read(&path, params).await?;
    shape_list(raw)
}

/// Request to create a database account
#[derive(Debug, Clone, Serialize)]
pub struct CreateAccountParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_biz_id: Option<u64>,
    pub user: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

/// Create a database account
pub async fn create_account(client: &ApiClient, params: &CreateAccountParams) -> Result<()> {
    let biz = client.resolve_biz(params.bk_biz_id);
    let path = client.mysql_path(biz, &format!("{}/create_account/", ACCOUNT));
    client.write(&path, params).await?;
    Ok(())
}

/// Selection for an account deletion
#[derive(Debug, Clone, Serialize)]
pub struct DeleteAccountParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_biz_id: Option<u64>,
    pub account_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

/// Delete a database account
pub async fn delete_account(client: &ApiClient, params: &DeleteAccountParams) -> Result<()> {
    let biz = client.resolve_biz(params.bk_biz_id);
    let path = client.mysql_path(biz, &format!("{}/delete_account/", ACCOUNT));
    client.remove(&path, params).await?;
    Ok(())
}

/// Request to attach a rule to an account
#[derive(Debug, Clone, Serialize)]
pub struct AccountRuleParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_biz_id: Option<u64>,
    pub account_id: u64,
    pub access_db: String,
    pub privilege: RulePrivilege,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

/// Attach a new rule to an account
pub async fn add_account_rule(client: &ApiClient, params: &AccountRuleParams) -> Result<()> {
    let biz = client.resolve_biz(params.bk_biz_id);
    let path = client.mysql_path(biz, &format!("{}/add_account_rule/", ACCOUNT));
    client.write(&path, params).await?;
    Ok(())
}

/// Request to rewrite an existing account rule
#[derive(Debug, Clone, Serialize)]
pub struct ModifyAccountRuleParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_biz_id: Option<u64>,
    pub rule_id: u64,
    pub account_id: u64,
    pub access_db: String,
    pub privilege: RulePrivilege,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

/// Rewrite an existing account rule
pub async fn modify_account_rule(
    client: &ApiClient,
    params: &ModifyAccountRuleParams,
) -> Result<()> {
    let biz = client.resolve_biz(params.bk_biz_id);
    let path = client.mysql_path(biz, &format!("{}/modify_account_rule/", ACCOUNT));
    client.write(&path, params).await?;
    Ok(())
}

/// Candidate rule for the add-rule precheck
#[derive(Debug, Clone, Serialize)]
pub struct PrecheckAccountRuleParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_biz_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    pub access_db: String,
    pub privilege: RulePrivilege,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

/// Outcome of the add-rule precheck
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountRulePrecheck {
    #[serde(default)]
    pub force_run: bool,
    #[serde(default)]
    pub warning: Option<String>,
}

/// Check whether a candidate rule conflicts with existing grants
pub async fn precheck_add_account_rule(
    client: &ApiClient,
    params: &PrecheckAccountRuleParams,
) -> Result<AccountRulePrecheck> {
    let biz = client.resolve_biz(params.bk_biz_id);
    let path = client.mysql_path(biz, &format!("{}/pre_check_add_account_rule/", ACCOUNT));
    let raw = client.write(&path, params).await?;
    shape_item(raw)
}

/// Selection for a rule lookup across accounts
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryAccountRulesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_biz_id: Option<u64>,
    pub user: String,
    pub access_dbs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

/// Look up the rules matching an account and database selection
pub async fn query_account_rules(
    client: &ApiClient,
    params: &QueryAccountRulesParams,
) -> Result<ListResponse<PermissionAccount>> {
    let biz = client.resolve_biz(params.bk_biz_id);
    let path = client.mysql_path(biz, &format!("{}/query_account_rules/", ACCOUNT));
    let raw = client.write(&path, params).await?;
    shape_list(raw)
}

// =========================================================================
// Authorization prechecks
// =========================================================================

/// Authorization request submitted for precheck
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizeData {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub access_dbs: Vec<String>,
    #[serde(default)]
    pub source_ips: Vec<String>,
    #[serde(default)]
    pub target_instances: Vec<String>,
    #[serde(default)]
    pub cluster_type: String,
}

/// Parameters for the authorize-rules precheck
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorizePrecheckParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_biz_id: Option<u64>,
    #[serde(flatten)]
    pub data: AuthorizeData,
}

/// Outcome of the authorize-rules precheck
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorizePrecheckResult {
    #[serde(default)]
    pub pre_check: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub authorize_uid: String,
    #[serde(default)]
    pub authorize_data: AuthorizeData,
}

/// Check an authorization request before submitting it as a ticket
pub async fn precheck_authorize_rules(
    client: &ApiClient,
    params: &AuthorizePrecheckParams,
) -> Result<AuthorizePrecheckResult> {
    let biz = client.resolve_biz(params.bk_biz_id);
    let path = client.mysql_path(biz, &format!("{}/pre_check_rules/", AUTHORIZE));
    let raw = client.write(&path, params).await?;
    shape_item(raw)
}

// =========================================================================
// Permission clone
// =========================================================================

/// Whether a clone copies an instance's grants or a client's grants
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloneType {
    #[default]
    Instance,
    Client,
}

/// One source/target pair in a clone request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneEntry {
    pub source: String,
    pub target: String,
}

/// Parameters for the permission-clone precheck
#[derive(Debug, Clone, Default, Serialize)]
pub struct PermissionCloneParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bk_biz_id: Option<u64>,
    pub clone_type: CloneType,
    pub clone_list: Vec<CloneEntry>,
    pub clone_cluster_type: String,
}

/// Outcome of the permission-clone precheck
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionCloneResult {
    #[serde(default)]
    pub pre_check: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub clone_uid: String,
    #[serde(default)]
    pub clone_data_list: Vec<CloneEntry>,
}

/// Check a permission-clone request before submitting it as a ticket
pub async fn precheck_permission_clone(
    client: &ApiClient,
    params: &PermissionCloneParams,
) -> Result<PermissionCloneResult> {
    let biz = client.resolve_biz(params.bk_biz_id);
    let path = client.mysql_path(biz, &format!("{}/pre_check_clone/", CLONE));
    let raw = client.write(&path, params).await?;
    shape_item(raw)
}
