use crate::rule::{DataNode, RuleError, ShardingRule, TableNameMapping, TableRule};

fn data_sources() -> Vec<String> {
    vec!["ds_0".to_string(), "ds_1".to_string()]
}

fn order_rule() -> TableRule {
    TableRule::from_expression(
        "t_order",
        Some("ds_${0..1}.t_order_${0..1}"),
        &data_sources(),
    )
    .expect("order rule should build")
}

fn sharding_rule() -> ShardingRule {
    let config_rule = TableRule::from_expression("t_config", None, &data_sources())
        .expect("config rule should build");

    ShardingRule::new(data_sources(), vec![order_rule(), config_rule])
        .expect("sharding rule should build")
}

//
// DataNode
//

#[test]
fn data_node_parses_source_and_table() {
    let node: DataNode = "ds_0.t_order_1".parse().expect("node should parse");

    assert_eq!(node.data_source(), "ds_0");
    assert_eq!(node.table(), "t_order_1");
    assert_eq!(node.to_string(), "ds_0.t_order_1");
}

#[test]
fn data_node_rejects_malformed_text() {
    for text in ["t_order", ".t_order", "ds_0.", "ds_0.a.b"] {
        assert_eq!(
            DataNode::parse(text),
            Err(RuleError::MalformedDataNode {
                node: text.to_string()
            }),
            "{text} should be rejected"
        );
    }
}

//
// TableRule
//

#[test]
fn table_rule_expands_node_expression_in_order() {
    let rule = order_rule();
    let nodes: Vec<String> = rule
        .actual_data_nodes()
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(
        nodes,
        [
            "ds_0.t_order_0",
            "ds_0.t_order_1",
            "ds_1.t_order_0",
            "ds_1.t_order_1"
        ]
    );
    assert_eq!(rule.actual_table_names(), ["t_order_0", "t_order_1"]);
    assert_eq!(rule.data_source_names(), ["ds_0", "ds_1"]);
}

#[test]
fn table_rule_defaults_to_logical_table_in_every_data_source() {
    let rule = TableRule::from_expression("t_config", None, &data_sources())
        .expect("default rule should build");

    assert_eq!(rule.actual_table_names(), ["t_config"]);
    assert_eq!(rule.actual_data_nodes().len(), 2);
}

#[test]
fn table_rule_rejects_bad_node_expression() {
    let err = TableRule::from_expression("t_order", Some("ds_${0..1"), &data_sources())
        .expect_err("unterminated expression must fail");

    assert!(matches!(
        err,
        RuleError::ActualDataNodes { ref logical_table, .. } if logical_table == "t_order"
    ));
}

#[test]
fn table_rule_rejects_empty_node_list() {
    let err = TableRule::from_expression("t_order", Some("ds_0.t_${[]}"), &data_sources())
        .expect_err("empty node list must fail");

    assert_eq!(
        err,
        RuleError::EmptyActualDataNodes {
            logical_table: "t_order".to_string()
        }
    );
}

#[test]
fn table_rule_matches_actual_tables_case_insensitively() {
    assert!(order_rule().contains_actual_table("T_ORDER_1"));
    assert!(!order_rule().contains_actual_table("t_order_2"));
}

//
// ShardingRule
//

#[test]
fn sharding_rule_maps_actual_tables_to_logical() {
    let rule = sharding_rule();

    assert_eq!(rule.logical_table_of("t_order_0"), Some("t_order"));
    assert_eq!(rule.logical_table_of("T_Order_1"), Some("t_order"));
    assert_eq!(rule.logical_table_of("t_config"), Some("t_config"));
    assert_eq!(rule.logical_table_of("t_unmanaged"), None);
}

#[test]
fn sharding_rule_finds_rules_by_logical_table() {
    let rule = sharding_rule();

    assert_eq!(
        rule.actual_tables_of("T_ORDER"),
        Some(vec!["t_order_0", "t_order_1"])
    );
    assert!(rule.find_table_rule_by_logical_table("t_missing").is_none());
}

#[test]
fn sharding_rule_from_data_source_expression() {
    let rule = ShardingRule::from_data_source_expression("ds_${0..1}", vec![order_rule()])
        .expect("rule should build");

    assert_eq!(rule.data_source_names(), ["ds_0", "ds_1"]);
    assert_eq!(rule.table_rules().len(), 1);
    assert_eq!(rule.table_rules()[0].logical_table(), "t_order");
}

#[test]
fn malformed_data_source_expression_is_a_rule_error() {
    let err = ShardingRule::expand_data_sources("ds_${0..").expect_err("unterminated");

    assert!(matches!(err, RuleError::DataSources(_)));
}

#[test]
fn sharding_rule_rejects_duplicate_logical_tables() {
    let err = ShardingRule::new(data_sources(), vec![order_rule(), order_rule()])
        .expect_err("duplicate logical table must fail");

    assert_eq!(
        err,
        RuleError::DuplicateLogicalTable {
            logical_table: "t_order".to_string()
        }
    );
}

#[test]
fn sharding_rule_rejects_unknown_data_source() {
    let err = ShardingRule::new(vec!["ds_0".to_string()], vec![order_rule()])
        .expect_err("node in undeclared data source must fail");

    assert!(matches!(
        err,
        RuleError::UnknownDataSource { ref data_source, .. } if data_source == "ds_1"
    ));
}

#[test]
fn sharding_rule_requires_data_sources() {
    assert_eq!(
        ShardingRule::new(Vec::new(), Vec::new()).map(|_| ()),
        Err(RuleError::NoDataSources)
    );
}

#[test]
fn sharding_rule_default_data_source_must_be_declared() {
    let rule = sharding_rule()
        .with_default_data_source("ds_1")
        .expect("declared default should be accepted");
    assert_eq!(rule.default_data_source(), Some("ds_1"));

    assert!(matches!(
        sharding_rule().with_default_data_source("ds_9"),
        Err(RuleError::UnknownDefaultDataSource { .. })
    ));
}
