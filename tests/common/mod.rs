#![allow(dead_code)]

use fieldmap::{AppState, DocumentFormat, MapperConfig, MappingPrompt, PredicateRequest, Side};
use std::collections::VecDeque;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const LOAD_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ProcessShipment xmlns="http://schema.infor.com/InforOAGIS/2" releaseID="9.2">
    <ApplicationArea>
        <CreationDateTime>2024-01-05T10:00:00Z</CreationDateTime>
    </ApplicationArea>
    <DataArea>
        <Shipment code="Z">
            <ShipmentID>SH-1</ShipmentID>
            <Stop type="pickup"><City>Oslo</City><Weight>12.5</Weight></Stop>
            <Stop type="drop"><City>Bergen</City><Weight>3</Weight></Stop>
        </Shipment>
    </DataArea>
</ProcessShipment>"#;

pub const ORDER_JSON: &str = r#"{
    "order": {
        "id": "1",
        "customer": { "name": "Acme" },
        "lines": [ { "sku": "a", "qty": 1 } ]
    }
}"#;

pub const TARGET_XML: &str = r#"<SyncLoad>
    <Load>
        <Id/>
        <Leg kind="a"><Town/></Leg>
        <Leg kind="b"><Town/></Leg>
    </Load>
</SyncLoad>"#;

/// A state with both samples loaded.
pub fn loaded_state(
    input: (&str, DocumentFormat),
    output: (&str, DocumentFormat),
) -> AppState {
    AppState::new(MapperConfig::new().with_formats(input.1, output.1))
        .load_sample(Side::Input, input.0)
        .expect("input sample parses")
        .load_sample(Side::Output, output.0)
        .expect("output sample parses")
}

/// Answers prompts from a queue; `None` entries are cancellations.
#[derive(Default)]
pub struct QueuedPrompt {
    predicates: VecDeque<Option<String>>,
    constants: VecDeque<Option<String>>,
    pub requests: Vec<PredicateRequest>,
}

impl QueuedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_predicate(mut self, answer: Option<&str>) -> Self {
        self.predicates.push_back(answer.map(str::to_string));
        self
    }

    pub fn with_constant(mut self, answer: Option<&str>) -> Self {
        self.constants.push_back(answer.map(str::to_string));
        self
    }
}

impl MappingPrompt for QueuedPrompt {
    fn predicate(&mut self, request: &PredicateRequest) -> Option<String> {
        self.requests.push(request.clone());
        self.predicates.pop_front().flatten()
    }

    fn constant_value(&mut self, _output_path: &str) -> Option<String> {
        self.constants.pop_front().flatten()
    }
}
