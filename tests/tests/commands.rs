use ovsdb_orm::{
    driver::{operation::Insert, Operation},
    Model, ModelMutation, Mutator, Row, Value,
};
use tests::{models, models::*, DbTest};

use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};

fn binding_row(tunnel_key: i64) -> Row {
    Row::new().with("tunnel_key", tunnel_key).with(
        "external_ids",
        Value::Map(BTreeMap::from([("a".to_string(), "b".to_string())])),
    )
}

fn switch_row(name: &str) -> Row {
    Row::new()
        .with("name", name)
        .with("ports", Value::empty_set())
        .with("external_ids", Value::Map(BTreeMap::new()))
}

#[tokio::test]
async fn get_then_delete_by_identifier() {
    let test = DbTest::new();
    let db = test.setup_db(models!(DatapathBinding));

    test.seed("Datapath_Binding", "u1", binding_row(4));

    let binding: DatapathBinding = db.get_by_id("u1").unwrap();
    assert_eq!(binding.tunnel_key, 4);
    assert_eq!(
        binding.external_ids,
        HashMap::from([("a".to_string(), "b".to_string())])
    );

    let mut command = db.delete(&binding, &[]).unwrap();
    assert_eq!(
        db.transact_params(std::slice::from_ref(&command)).unwrap(),
        json!([
            "OVN_Northbound",
            {
                "op": "delete",
                "table": "Datapath_Binding",
                "where": [["_uuid", "==", ["named-uuid", "u1"]]],
            }
        ])
    );

    db.execute(std::slice::from_mut(&mut command)).await.unwrap();
    assert_eq!(command.results().unwrap()[0].count, Some(1));
    assert!(test.exec_log().has_delete());

    let err = db.get_by_id::<DatapathBinding>("u1").unwrap_err();
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn delete_after_external_removal() {
    let test = DbTest::new();
    let db = test.setup_db(models!(DatapathBinding));

    test.seed("Datapath_Binding", "u1", binding_row(4));
    let binding: DatapathBinding = db.get_by_id("u1").unwrap();

    test.remove("Datapath_Binding", "u1");

    assert!(db.get_by_id::<DatapathBinding>("u1").unwrap_err().is_record_not_found());
    assert!(db.delete(&binding, &[]).unwrap_err().is_record_not_found());
}

#[tokio::test]
async fn create_then_read_back() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalSwitch));

    let switch = LogicalSwitch {
        name: "sw0".to_string(),
        external_ids: HashMap::from([("owner".to_string(), "test".to_string())]),
        ..Default::default()
    };

    let mut command = db.create(&switch).unwrap();
    let [Operation::Insert(Insert { table, row, uuid_name })] = command.operations() else {
        panic!("expected a single insert, got {:#?}", command.operations());
    };
    assert_eq!(table, "Logical_Switch");
    assert!(!row.contains("_uuid"));
    let name = uuid_name.clone().unwrap();
    assert!(name.starts_with("row"));

    db.execute(std::slice::from_mut(&mut command)).await.unwrap();
    let uuid = command.results().unwrap()[0].uuid.clone().unwrap();

    let created: LogicalSwitch = db.get_by_id(uuid.as_str()).unwrap();
    assert_eq!(created.name, "sw0");
    assert_eq!(created.external_ids, switch.external_ids);
    assert!(test.exec_log().has_insert());
}

#[tokio::test]
async fn duplicate_guard() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalSwitch));

    test.seed("Logical_Switch", "u1", switch_row("sw0"));

    let duplicate = LogicalSwitch {
        name: "sw0".to_string(),
        ..Default::default()
    };
    let err = db.create(&duplicate).unwrap_err();
    assert!(err.is_already_exists());

    let other = LogicalSwitch {
        name: "sw1".to_string(),
        ..Default::default()
    };
    assert!(db.create(&other).is_ok());

    // Nothing to compare: no duplicate check
    assert!(db.create(&LogicalSwitch::default()).is_ok());
}

#[tokio::test]
async fn duplicate_guard_with_preset_identifier() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalSwitch));

    test.seed("Logical_Switch", "u1", switch_row("sw0"));

    let same_name = LogicalSwitch {
        uuid: db.generate_identifier().unwrap(),
        name: "sw0".to_string(),
        ..Default::default()
    };
    let err = db.create(&same_name).unwrap_err();
    assert!(err.is_already_exists());

    let same_row = LogicalSwitch {
        uuid: "u1".to_string(),
        name: "sw1".to_string(),
        ..Default::default()
    };
    assert!(db.create(&same_row).unwrap_err().is_already_exists());

    let fresh = LogicalSwitch {
        uuid: db.generate_identifier().unwrap(),
        name: "sw1".to_string(),
        ..Default::default()
    };
    assert!(db.create(&fresh).is_ok());
}

#[tokio::test]
async fn create_rejects_undeclarable_identifier() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalSwitch));

    let switch = LogicalSwitch {
        uuid: "9f0c3b39-0e0c-4a57-a1a3-8a6f8a6a37a4".to_string(),
        name: "sw0".to_string(),
        ..Default::default()
    };
    let err = db.create(&switch).unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(
        err.to_string(),
        "type mismatch in column `_uuid`: expected named uuid, found `9f0c3b39-0e0c-4a57-a1a3-8a6f8a6a37a4`"
    );
}

#[tokio::test]
async fn create_keeps_caller_identifier() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalSwitchPort));

    let port = LogicalSwitchPort {
        uuid: db.generate_identifier().unwrap(),
        name: "lsp0".to_string(),
        ..Default::default()
    };

    let command = db.create(&port).unwrap();
    let Operation::Insert(insert) = &command.operations()[0] else {
        panic!("expected insert");
    };
    assert_eq!(insert.uuid_name.as_deref(), Some(port.uuid.as_str()));
}

#[tokio::test]
async fn append_reference_with_mutate() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalSwitch));

    test.seed("Logical_Switch", "u1", switch_row("sw0"));
    let switch: LogicalSwitch = db.get_by_id("u1").unwrap();

    let mut command = db
        .mutate(&switch, vec![ModelMutation::insert("ports", ["u2"])], &[])
        .unwrap();
    assert_eq!(
        db.transact_params(std::slice::from_ref(&command)).unwrap()[1],
        json!({
            "op": "mutate",
            "table": "Logical_Switch",
            "where": [["_uuid", "==", ["named-uuid", "u1"]]],
            "mutations": [["ports", "insert", ["set", [["named-uuid", "u2"]]]]],
        })
    );

    db.execute(std::slice::from_mut(&mut command)).await.unwrap();
    assert!(test.exec_log().has_mutate());

    let mut switch = LogicalSwitch::default();
    let row = db.cache().lookup("Logical_Switch", "u1").unwrap();
    db.decode("u1", &row, &mut switch).unwrap();
    db.decode("u1", &row, &mut switch).unwrap();
    assert_eq!(switch.ports, ["u2"]);
}

#[tokio::test]
async fn port_and_switch_in_one_transaction() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalSwitch, LogicalSwitchPort));

    test.seed("Logical_Switch", "u1", switch_row("sw0"));
    let switch: LogicalSwitch = db.get_by_id("u1").unwrap();

    let port = LogicalSwitchPort {
        uuid: db.generate_identifier().unwrap(),
        name: "lsp0".to_string(),
        ..Default::default()
    };

    let mut commands = vec![
        db.create(&port).unwrap(),
        db.mutate(
            &switch,
            vec![ModelMutation::insert("ports", [port.uuid.as_str()])],
            &[],
        )
        .unwrap(),
    ];
    db.execute(&mut commands).await.unwrap();
    assert_eq!(test.exec_log().len(), 1);
    assert_eq!(test.exec_log().last().len(), 2);

    let ports = db.list::<LogicalSwitchPort>().unwrap();
    assert_eq!(ports.len(), 1);

    let switch: LogicalSwitch = db.get_by_id("u1").unwrap();
    assert_eq!(switch.ports, [ports[0].uuid.clone()]);
}

#[tokio::test]
async fn mutate_resolves_target_by_index() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalSwitch));

    test.seed("Logical_Switch", "u1", switch_row("sw0"));

    let probe = LogicalSwitch {
        name: "sw0".to_string(),
        ..Default::default()
    };
    let command = db
        .mutate(&probe, vec![ModelMutation::delete("ports", ["p1"])], &["name"])
        .unwrap();

    let Operation::Mutate(mutate) = &command.operations()[0] else {
        panic!("expected mutate");
    };
    assert_eq!(mutate.conditions.len(), 1);
    assert_eq!(mutate.conditions[0].column, "name");
    assert_eq!(mutate.mutations[0].mutator, Mutator::Delete);

    let missing = LogicalSwitch {
        name: "sw9".to_string(),
        ..Default::default()
    };
    let err = db
        .mutate(&missing, vec![ModelMutation::insert("ports", ["p1"])], &[])
        .unwrap_err();
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn mutate_rejects_bad_columns() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalSwitch));

    test.seed("Logical_Switch", "u1", switch_row("sw0"));
    let switch: LogicalSwitch = db.get_by_id("u1").unwrap();

    let err = db
        .mutate(&switch, vec![ModelMutation::insert("name", ["x"])], &[])
        .unwrap_err();
    assert!(err.is_unsupported_type());

    let err = db
        .mutate(&switch, vec![ModelMutation::insert("nope", ["x"])], &[])
        .unwrap_err();
    assert!(err.is_schema());
}

#[tokio::test]
async fn delete_falls_back_to_first_index() {
    #[derive(Debug, Default, Model)]
    #[table = "Chassis"]
    struct Chassis {
        #[ovsdb("_uuid")]
        uuid: String,

        #[ovsdb("name,index")]
        name: String,

        #[ovsdb("hostname,index")]
        hostname: String,
    }

    let test = DbTest::new();
    let db = test.setup_db(models!(Chassis));

    test.seed(
        "Chassis",
        "u1",
        Row::new().with("name", "ch0").with("hostname", "host0"),
    );

    let probe = Chassis {
        name: "ch0".to_string(),
        hostname: "host0".to_string(),
        ..Default::default()
    };

    let command = db.delete(&probe, &[]).unwrap();
    let Operation::Delete(delete) = &command.operations()[0] else {
        panic!("expected delete");
    };
    let columns: Vec<_> = delete.conditions.iter().map(|c| c.column.as_str()).collect();
    assert_eq!(columns, ["name"]);

    let command = db.delete(&probe, &["name", "hostname"]).unwrap();
    let Operation::Delete(delete) = &command.operations()[0] else {
        panic!("expected delete");
    };
    assert_eq!(delete.conditions.len(), 2);

    // No identifier and no index value: nothing to target
    let err = db.delete(&Chassis::default(), &[]).unwrap_err();
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn update_overwrites_columns() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalSwitch));

    test.seed("Logical_Switch", "u1", switch_row("sw0"));
    let mut switch: LogicalSwitch = db.get_by_id("u1").unwrap();
    switch
        .external_ids
        .insert("owner".to_string(), "test".to_string());

    let mut command = db.update(&switch, &[]).unwrap();
    db.execute(std::slice::from_mut(&mut command)).await.unwrap();

    let switch: LogicalSwitch = db.get_by_id("u1").unwrap();
    assert_eq!(switch.external_ids.get("owner").map(String::as_str), Some("test"));
    assert_eq!(switch.name, "sw0");
}

#[tokio::test]
async fn executed_commands_are_not_rerun() {
    let test = DbTest::new();
    let db = test.setup_db(models!(LogicalSwitch));

    let switch = LogicalSwitch {
        name: "sw0".to_string(),
        ..Default::default()
    };
    let mut commands = [db.create(&switch).unwrap()];
    db.execute(&mut commands).await.unwrap();
    assert!(commands[0].is_executed());

    assert!(db.execute(&mut commands).await.is_err());
    assert_eq!(test.exec_log().len(), 1);

    commands[0].clear_results();
    db.execute(&mut commands).await.unwrap();
    assert_eq!(test.exec_log().len(), 2);
    assert_eq!(db.list::<LogicalSwitch>().unwrap().len(), 2);
}

#[tokio::test]
async fn encode_errors_abort_the_build() {
    #[derive(Debug, Default, Model)]
    #[table = "Load_Balancer"]
    struct LoadBalancer {
        #[ovsdb("_uuid")]
        uuid: String,

        #[ovsdb("protocol")]
        protocol: Vec<i64>,
    }

    let test = DbTest::new();
    let db = test.setup_db(models!(LoadBalancer));

    let lb = LoadBalancer {
        protocol: vec![6],
        ..Default::default()
    };
    let err = db.create(&lb).unwrap_err();
    assert!(err.is_unsupported_type());
    assert!(test.exec_log().is_empty());
}

#[derive(Debug)]
struct Unreachable;

#[ovsdb_orm::async_trait]
impl ovsdb_orm::Executor for Unreachable {
    async fn execute(&self, _commands: &mut [ovsdb_orm::Command]) -> ovsdb_orm::Result<()> {
        Err(ovsdb_orm::Error::executor(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "server unreachable",
        )))
    }

    fn generate_identifier(&self) -> ovsdb_orm::Result<String> {
        Err(ovsdb_orm::Error::identifier_generation("entropy source unavailable"))
    }
}

#[tokio::test]
async fn executor_failures_surface() {
    let test = DbTest::new();
    let db = models!(LogicalSwitch)
        .cache(test.cache().clone())
        .build(Unreachable)
        .unwrap();

    let err = db.create(&LogicalSwitch::default()).unwrap_err();
    assert!(err.is_identifier_generation());

    let switch = LogicalSwitch {
        uuid: "sw0_row".to_string(),
        ..Default::default()
    };
    let mut commands = [db.create(&switch).unwrap()];
    let err = db.execute(&mut commands).await.unwrap_err();
    assert!(err.is_executor());
    assert!(!commands[0].is_executed());
}

#[tokio::test]
async fn transact_params_use_configured_database() {
    let test = DbTest::new();
    let mut builder = models!(DatapathBinding);
    builder.database("OVN_Southbound");
    let db = test.try_setup_db(builder).unwrap();

    let binding = DatapathBinding {
        uuid: "dp1".to_string(),
        tunnel_key: 7,
        ..Default::default()
    };
    let command = db.create(&binding).unwrap();

    assert_eq!(db.database(), "OVN_Southbound");
    assert_eq!(
        db.transact_params(&[command]).unwrap(),
        json!([
            "OVN_Southbound",
            {
                "op": "insert",
                "table": "Datapath_Binding",
                "row": {"tunnel_key": 7, "external_ids": ["map", []]},
                "uuid-name": "dp1",
            }
        ])
    );
}
