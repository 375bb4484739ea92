mod common;

use common::{LOAD_XML, ORDER_JSON, QueuedPrompt, TARGET_XML, TestResult, loaded_state};
use fieldmap::{
    DocumentFormat, MapperError, MappingRule, MappingStore, NodeKind, RuleId, RuleType, Selection,
    Session, Side,
};
use serde_json::json;

#[test]
fn test_constant_mapping_end_to_end() -> TestResult {
    let store = MappingStore::from_json(
        r#"[{"id":"1","outputPath":"order.id","ruleType":"constant","constantValue":"42"}]"#,
    )?;
    let script = fieldmap::generate_script(
        store.rules(),
        DocumentFormat::Json,
        DocumentFormat::Json,
        "",
    );
    assert!(script.contains("def transform(data):\n    output = {}\n"));
    assert!(script.contains("    set_nested_value(output, \"order.id\", \"42\")\n"));

    let output = fieldmap::preview(store.rules(), ORDER_JSON, DocumentFormat::Json)?;
    assert_eq!(output, json!({"order": {"id": "42"}}));
    Ok(())
}

#[test]
fn test_attribute_source_path_resolves() -> TestResult {
    let xml = r#"<root code="Z"><name>n</name></root>"#;
    let schema = fieldmap::parse_xml(xml)?;
    let attribute = &schema[0].children[0];
    assert_eq!(attribute.path, "root.@_code");
    assert_eq!(attribute.name, "code");
    assert!(attribute.is_attribute);

    let rules = vec![MappingRule::direct(RuleId::new("1"), "out.code", "root.@_code")];
    let script =
        fieldmap::generate_script(&rules, DocumentFormat::Xml, DocumentFormat::Json, "");
    assert!(script.contains("get_value(data, \"root.@_code\")"));
    assert!(script.contains("import xml.etree.ElementTree as ET"));

    let output = fieldmap::preview(&rules, xml, DocumentFormat::Xml)?;
    assert_eq!(output, json!({"out": {"code": "Z"}}));
    Ok(())
}

#[test]
fn test_namespaced_sample_schema() -> TestResult {
    let schema = fieldmap::parse_xml(LOAD_XML)?;
    assert_eq!(schema.len(), 1);
    let root = &schema[0];
    assert_eq!(root.path, "ProcessShipment");
    assert_eq!(root.children[0].path, "ProcessShipment.@_releaseID");

    let stop = fieldmap_schema::find_node(&schema, "ProcessShipment.DataArea.Shipment.Stop")
        .ok_or("Stop node missing")?;
    assert_eq!(stop.kind, NodeKind::Array);
    let names: Vec<&str> = stop.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["type", "City", "Weight"]);
    assert_eq!(stop.children[2].kind, NodeKind::Number);
    assert!(fieldmap_schema::is_child_of_array(
        &schema,
        "ProcessShipment.DataArea.Shipment.Stop.City"
    ));
    Ok(())
}

#[test]
fn test_preview_follows_namespaced_predicates() -> TestResult {
    let rules = vec![
        MappingRule::direct(RuleId::new("1"), "load.id", "ProcessShipment.DataArea.Shipment.ShipmentID"),
        MappingRule::direct(
            RuleId::new("2"),
            "load.legs.0.town",
            "ProcessShipment.DataArea.Shipment.Stop[@type='drop'].City",
        ),
        MappingRule::direct(
            RuleId::new("3"),
            "load.legs.0.weight",
            "ProcessShipment.DataArea.Shipment.Stop[@type='drop'].Weight",
        ),
        MappingRule::direct(RuleId::new("4"), "load.code", "ProcessShipment.DataArea.Shipment.@_code"),
    ];
    let output = fieldmap::preview(&rules, LOAD_XML, DocumentFormat::Xml)?;
    assert_eq!(
        output,
        json!({
            "load": {
                "id": "SH-1",
                "legs": [{ "town": "Bergen", "weight": "3" }],
                "code": "Z"
            }
        })
    );
    Ok(())
}

#[test]
fn test_click_protocol_to_stylesheet() -> TestResult {
    let mut session = Session::new(loaded_state(
        (LOAD_XML, DocumentFormat::Xml),
        (TARGET_XML, DocumentFormat::Xml),
    ));
    let mut prompt = QueuedPrompt::new()
        .with_predicate(Some("@type='drop'"))
        .with_predicate(Some("@kind='b'"))
        .with_constant(Some("L-1"));

    session.click_input("ProcessShipment.DataArea.Shipment.Stop.City", &mut prompt)?;
    session.click_output("SyncLoad.Load.Leg.Town", &mut prompt)?;
    let state = session.click_output("SyncLoad.Load.Id", &mut prompt)?;

    assert_eq!(prompt.requests.len(), 2);
    assert_eq!(prompt.requests[0].suggestions, vec!["type".to_string()]);
    assert_eq!(prompt.requests[1].side, Side::Output);
    assert_eq!(state.selection, Selection::Idle);

    let types: Vec<RuleType> = state.mappings.iter().map(MappingRule::rule_type).collect();
    assert_eq!(types, vec![RuleType::Direct, RuleType::Constant]);

    assert!(!state.can_generate_script());
    let state = session.apply(|s| s.generate_xslt())?;
    let xslt = state.generated.xslt.as_deref().ok_or("no stylesheet")?;
    roxmltree::Document::parse(xslt)?;
    assert!(xslt.contains("<Town kind=\"b\">"));
    assert!(xslt.contains(
        "<xsl:value-of select=\"/ns:ProcessShipment/ns:DataArea/ns:Shipment/ns:Stop/ns:City[@type='drop']\"/>"
    ));
    assert!(xslt.contains("<Id>L-1</Id>"));
    Ok(())
}

#[test]
fn test_identity_mode_from_state() -> TestResult {
    let store = MappingStore::new()
        .with_constant("SyncLoad.Load.Extra.Flag", "Y")?
        .with_direct("SyncLoad.Load.Extra.Ref", "ProcessShipment.DataArea.Shipment.ShipmentID")?;
    let state = loaded_state(
        (LOAD_XML, DocumentFormat::Xml),
        (TARGET_XML, DocumentFormat::Xml),
    )
    .with_mappings(store)
    .with_copy_input_structure(true)
    .generate_xslt()?;
    let xslt = state.generated.xslt.as_deref().ok_or("no stylesheet")?;
    roxmltree::Document::parse(xslt)?;
    assert_eq!(xslt.matches("<xsl:template match=\"ns:SyncLoad/ns:Load\">").count(), 1);
    let flag = xslt.find("name=\"Flag\"").ok_or("Flag missing")?;
    let reference = xslt.find("name=\"Ref\"").ok_or("Ref missing")?;
    assert!(flag < reference);
    Ok(())
}

#[test]
fn test_delete_keeps_remaining_order() -> TestResult {
    let store = MappingStore::new()
        .with_constant("a.one", "1")?
        .with_constant("a.two", "2")?
        .with_constant("a.three", "3")?
        .with_constant("a.four", "4")?;
    let doomed = store.rules()[1].id.clone();
    let state = loaded_state(
        (ORDER_JSON, DocumentFormat::Json),
        (ORDER_JSON, DocumentFormat::Json),
    )
    .with_mappings(store)
    .delete_mapping(&doomed);
    let outputs: Vec<&str> = state.mappings.iter().map(|r| r.output_path.as_str()).collect();
    assert_eq!(outputs, vec!["a.one", "a.three", "a.four"]);
    Ok(())
}

#[test]
fn test_reupload_clears_mappings_and_code() -> TestResult {
    let state = loaded_state(
        (ORDER_JSON, DocumentFormat::Json),
        (ORDER_JSON, DocumentFormat::Json),
    )
    .with_mappings(MappingStore::new().with_direct("order.id", "order.customer.name")?)
    .generate_script()?;
    assert!(state.generated.script.is_some());

    for side in [Side::Input, Side::Output] {
        let reloaded = state.load_sample(side, ORDER_JSON)?;
        assert!(reloaded.mappings.is_empty());
        assert!(reloaded.generated.script.is_none());
        assert!(reloaded.generated.xslt.is_none());
    }
    Ok(())
}

#[test]
fn test_unavailable_generator_is_an_error() {
    let state = loaded_state(
        (ORDER_JSON, DocumentFormat::Json),
        (ORDER_JSON, DocumentFormat::Json),
    );
    let state = state.with_mappings(MappingStore::new().with_constant("x", "1").unwrap());
    match state.generate_xslt() {
        Err(MapperError::GenerationUnavailable { generator, .. }) => assert_eq!(generator, "XSLT"),
        other => panic!("expected GenerationUnavailable, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_mapping_file_shape() -> TestResult {
    let store = MappingStore::from_rules(vec![
        MappingRule::direct(RuleId::new("10"), "out.a", "in.a"),
        MappingRule::constant(RuleId::new("11"), "out.b", "B"),
    ])?;
    let value: serde_json::Value = serde_json::from_str(&store.to_json()?)?;
    assert_eq!(
        value,
        json!([
            {"id": "10", "outputPath": "out.a", "ruleType": "direct", "sourcePath": "in.a"},
            {"id": "11", "outputPath": "out.b", "ruleType": "constant", "constantValue": "B"}
        ])
    );
    assert_eq!(MappingStore::from_json(&store.to_json()?)?, store);
    Ok(())
}
