//! # 实体定义测试

use crate::system_integrations;
use sea_orm::{EntityName, Iterable, Set};

#[test]
fn test_system_integration_active_model() {
    let integration = system_integrations::ActiveModel {
        classify: Set(2),
        status: Set(false),
        config: Set("{}".to_string()),
        app_id: Set("client-id".to_string()),
        ..Default::default()
    };

    assert_eq!(integration.classify.as_ref(), &2);
    assert_eq!(integration.status.as_ref(), &false);
    assert_eq!(integration.app_id.as_ref(), "client-id");
}

#[test]
fn test_system_integration_table_name() {
    assert_eq!(
        system_integrations::Entity.table_name(),
        "system_integrations"
    );
}

#[test]
fn test_system_integration_columns() {
    let columns: Vec<String> = system_integrations::Column::iter()
        .map(|c| format!("{c:?}"))
        .collect();

    for expected in [
        "Classify", "Status", "Config", "AppId", "AppSecret", "CorpId", "AgentId", "AppKey",
    ] {
        assert!(columns.iter().any(|c| c == expected), "missing column {expected}");
    }
}
