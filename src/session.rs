//! The click protocol that turns tree activations into mapping rules.
//!
//! A session owns the current [`AppState`] snapshot behind an [`Arc`] and
//! swaps it wholesale on every transition, so a reader holding an earlier
//! snapshot never observes a partial update.
use crate::error::{MapperError, Side};
use crate::state::AppState;
use fieldmap_path::splice_predicate;
use fieldmap_schema::{
    DocumentFormat, attribute_suggestions, find_node, is_child_of_array, predicate_prompt,
};
use std::sync::Arc;

/// Pending input selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    /// An input node was activated; its path (possibly with a predicate) is
    /// the source of the next output click.
    InputSelected { source_path: String },
}

/// What the user is asked when a clicked node sits below an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateRequest {
    pub side: Side,
    pub path: String,
    /// Attribute names found next to the clicked node.
    pub suggestions: Vec<String>,
    pub prompt: String,
}

/// The interactive collaborator that supplies predicates and constants.
///
/// Returning `None` means the user cancelled the prompt.
pub trait MappingPrompt {
    fn predicate(&mut self, request: &PredicateRequest) -> Option<String>;
    fn constant_value(&mut self, output_path: &str) -> Option<String>;
}

/// Outcome of asking for an optional predicate.
enum PathChoice {
    Path(String),
    Cancelled,
}

pub struct Session {
    state: Arc<AppState>,
}

impl Session {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Applies a fallible transition; the snapshot is only replaced on success.
    pub fn apply<F>(&mut self, transition: F) -> Result<Arc<AppState>, MapperError>
    where
        F: FnOnce(&AppState) -> Result<AppState, MapperError>,
    {
        let next = transition(&self.state)?;
        self.state = Arc::new(next);
        Ok(self.state())
    }

    pub fn update<F>(&mut self, transition: F) -> Arc<AppState>
    where
        F: FnOnce(&AppState) -> AppState,
    {
        self.state = Arc::new(transition(&self.state));
        self.state()
    }

    /// Activates an input node. The captured path replaces any pending one.
    pub fn click_input(
        &mut self,
        path: &str,
        prompt: &mut dyn MappingPrompt,
    ) -> Result<Arc<AppState>, MapperError> {
        self.ensure_node(Side::Input, path)?;
        match self.choose_path(Side::Input, path, prompt) {
            PathChoice::Path(source_path) => {
                log::debug!("Selected input '{}'", source_path);
                Ok(self.update(|s| s.with_selection(Selection::InputSelected { source_path })))
            }
            PathChoice::Cancelled => Ok(self.state()),
        }
    }

    /// Activates an output node.
    ///
    /// With an input pending this appends a direct rule and returns to idle.
    /// Otherwise the prompt is asked for a constant, and a non-empty answer
    /// appends a constant rule.
    pub fn click_output(
        &mut self,
        path: &str,
        prompt: &mut dyn MappingPrompt,
    ) -> Result<Arc<AppState>, MapperError> {
        self.ensure_node(Side::Output, path)?;
        match self.state.selection.clone() {
            Selection::InputSelected { source_path } => {
                // A cancelled predicate still maps to the plain path.
                let output_path = match self.choose_path(Side::Output, path, prompt) {
                    PathChoice::Path(p) => p,
                    PathChoice::Cancelled => path.to_string(),
                };
                self.apply(|s| {
                    let mappings = s.mappings.with_direct(&output_path, &source_path)?;
                    Ok(s.with_mappings(mappings).with_selection(Selection::Idle))
                })
            }
            Selection::Idle => {
                let PathChoice::Path(output_path) = self.choose_path(Side::Output, path, prompt)
                else {
                    return Ok(self.state());
                };
                match prompt.constant_value(&output_path) {
                    Some(value) if !value.is_empty() => self.apply(|s| {
                        let mappings = s.mappings.with_constant(&output_path, &value)?;
                        Ok(s.with_mappings(mappings))
                    }),
                    _ => Ok(self.state()),
                }
            }
        }
    }

    fn ensure_node(&self, side: Side, path: &str) -> Result<(), MapperError> {
        match find_node(self.state.schema(side), path) {
            Some(_) => Ok(()),
            None => Err(MapperError::UnknownNode {
                side,
                path: path.to_string(),
            }),
        }
    }

    /// Asks for a predicate when the side is XML and the node is below an
    /// array. A blank answer keeps the plain path.
    fn choose_path(&self, side: Side, path: &str, prompt: &mut dyn MappingPrompt) -> PathChoice {
        let schema = self.state.schema(side);
        if self.state.format(side) != DocumentFormat::Xml || !is_child_of_array(schema, path) {
            return PathChoice::Path(path.to_string());
        }
        let suggestions = attribute_suggestions(schema, path);
        let request = PredicateRequest {
            side,
            path: path.to_string(),
            prompt: predicate_prompt(&suggestions),
            suggestions,
        };
        match prompt.predicate(&request) {
            None => PathChoice::Cancelled,
            Some(answer) if answer.trim().is_empty() => PathChoice::Path(path.to_string()),
            Some(answer) => PathChoice::Path(splice_predicate(path, answer.trim())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapperConfig;
    use fieldmap_rules::RuleType;
    use std::collections::VecDeque;

    /// Replays scripted answers; `None` entries are cancellations.
    #[derive(Default)]
    struct Scripted {
        predicates: VecDeque<Option<String>>,
        constants: VecDeque<Option<String>>,
        asked: Vec<PredicateRequest>,
    }

    impl Scripted {
        fn answer_predicate(mut self, answer: Option<&str>) -> Self {
            self.predicates.push_back(answer.map(str::to_string));
            self
        }

        fn answer_constant(mut self, answer: Option<&str>) -> Self {
            self.constants.push_back(answer.map(str::to_string));
            self
        }
    }

    impl MappingPrompt for Scripted {
        fn predicate(&mut self, request: &PredicateRequest) -> Option<String> {
            self.asked.push(request.clone());
            self.predicates.pop_front().flatten()
        }

        fn constant_value(&mut self, _output_path: &str) -> Option<String> {
            self.constants.pop_front().flatten()
        }
    }

    const INPUT_XML: &str = r#"
        <Shipment>
            <Stop seq="1" kind="pickup"><City>Oslo</City></Stop>
            <Stop seq="2" kind="drop"><City>Bergen</City></Stop>
            <Ref>R1</Ref>
        </Shipment>"#;
    const OUTPUT_XML: &str = r#"<Load><Leg type="a"><Town/></Leg><Leg type="b"><Town/></Leg><Id/></Load>"#;

    fn session(output: DocumentFormat) -> Session {
        let output_text = match output {
            DocumentFormat::Xml => OUTPUT_XML,
            DocumentFormat::Json => r#"{"load":{"legs":[{"town":"x"}],"id":"1"}}"#,
        };
        let state = AppState::new(
            MapperConfig::new().with_formats(DocumentFormat::Xml, output),
        )
        .load_sample(Side::Input, INPUT_XML)
        .unwrap()
        .load_sample(Side::Output, output_text)
        .unwrap();
        Session::new(state)
    }

    #[test]
    fn test_direct_mapping_with_predicates() {
        let mut session = session(DocumentFormat::Xml);
        let mut prompt = Scripted::default()
            .answer_predicate(Some("@seq='2'"))
            .answer_predicate(Some("@type='b'"));

        let state = session.click_input("Shipment.Stop.City", &mut prompt).unwrap();
        assert_eq!(
            state.selection,
            Selection::InputSelected {
                source_path: "Shipment.Stop.City[@seq='2']".to_string()
            }
        );
        assert_eq!(prompt.asked[0].suggestions, vec!["seq".to_string(), "kind".to_string()]);
        assert_eq!(
            prompt.asked[0].prompt,
            "Enter array filter predicate (e.g., @seq='value' or leave empty):"
        );

        let state = session.click_output("Load.Leg.Town", &mut prompt).unwrap();
        assert_eq!(state.selection, Selection::Idle);
        let rule = &state.mappings.rules()[0];
        assert_eq!(rule.rule_type(), RuleType::Direct);
        assert_eq!(rule.output_path, "Load.Leg.Town[@type='b']");
        assert_eq!(rule.source_path(), Some("Shipment.Stop.City[@seq='2']"));
    }

    #[test]
    fn test_cancelled_input_predicate_keeps_selection() {
        let mut session = session(DocumentFormat::Xml);
        let mut prompt = Scripted::default().answer_predicate(None);
        let state = session.click_input("Shipment.Stop.City", &mut prompt).unwrap();
        assert_eq!(state.selection, Selection::Idle);
    }

    #[test]
    fn test_blank_predicate_uses_plain_path() {
        let mut session = session(DocumentFormat::Xml);
        let mut prompt = Scripted::default().answer_predicate(Some("  "));
        let state = session.click_input("Shipment.Stop.City", &mut prompt).unwrap();
        assert_eq!(
            state.selection,
            Selection::InputSelected {
                source_path: "Shipment.Stop.City".to_string()
            }
        );
    }

    #[test]
    fn test_second_input_click_replaces_pending() {
        let mut session = session(DocumentFormat::Xml);
        let mut prompt = Scripted::default().answer_predicate(Some(""));
        session.click_input("Shipment.Stop.City", &mut prompt).unwrap();
        let state = session.click_input("Shipment.Ref", &mut prompt).unwrap();
        assert_eq!(
            state.selection,
            Selection::InputSelected {
                source_path: "Shipment.Ref".to_string()
            }
        );
        assert!(state.mappings.is_empty());
    }

    #[test]
    fn test_constant_mapping() {
        let mut session = session(DocumentFormat::Xml);
        let mut prompt = Scripted::default().answer_constant(Some("L-1"));
        let state = session.click_output("Load.Id", &mut prompt).unwrap();
        assert!(prompt.asked.is_empty());
        let rule = &state.mappings.rules()[0];
        assert_eq!(rule.constant_value(), Some("L-1"));
        assert_eq!(rule.output_path, "Load.Id");
    }

    #[test]
    fn test_cancelled_or_empty_constant_adds_nothing() {
        let mut session = session(DocumentFormat::Xml);
        let mut prompt = Scripted::default().answer_constant(None).answer_constant(Some(""));
        session.click_output("Load.Id", &mut prompt).unwrap();
        let state = session.click_output("Load.Id", &mut prompt).unwrap();
        assert!(state.mappings.is_empty());
    }

    #[test]
    fn test_cancelled_predicate_on_constant_adds_nothing() {
        let mut session = session(DocumentFormat::Xml);
        let mut prompt = Scripted::default().answer_predicate(None).answer_constant(Some("x"));
        let state = session.click_output("Load.Leg.Town", &mut prompt).unwrap();
        assert!(state.mappings.is_empty());
    }

    #[test]
    fn test_cancelled_predicate_on_direct_uses_plain_path() {
        let mut session = session(DocumentFormat::Xml);
        let mut prompt = Scripted::default().answer_predicate(None);
        session.click_input("Shipment.Ref", &mut prompt).unwrap();
        let state = session.click_output("Load.Leg.Town", &mut prompt).unwrap();
        assert_eq!(state.mappings.rules()[0].output_path, "Load.Leg.Town");
    }

    #[test]
    fn test_json_output_is_never_prompted_for_predicates() {
        let mut session = session(DocumentFormat::Json);
        let mut prompt = Scripted::default().answer_constant(Some("v"));
        let state = session.click_output("load.legs.town", &mut prompt).unwrap();
        assert!(prompt.asked.is_empty());
        assert_eq!(state.mappings.rules()[0].output_path, "load.legs.town");
    }

    #[test]
    fn test_unknown_node_is_rejected() {
        let mut session = session(DocumentFormat::Xml);
        let before = session.state();
        let err = session
            .click_input("Shipment.Nope", &mut Scripted::default())
            .unwrap_err();
        assert!(matches!(err, MapperError::UnknownNode { side: Side::Input, .. }));
        assert!(Arc::ptr_eq(&before, &session.state()));
    }

    #[test]
    fn test_snapshots_are_not_mutated() {
        let mut session = session(DocumentFormat::Xml);
        let before = session.state();
        session
            .click_output("Load.Id", &mut Scripted::default().answer_constant(Some("1")))
            .unwrap();
        assert!(before.mappings.is_empty());
        assert_eq!(session.state().mappings.len(), 1);
    }
}
