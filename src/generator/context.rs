use super::{GenerateOptions, RefsMode};
use crate::reflect::RecordShape;
use serde_json::{Map, Value};

/// Mutable state owned by a single `generate` call: the ref table that makes
/// recursion into record types cycle-safe.
pub(crate) struct GenerationContext {
    refs: RefsMode,
    all_fields_required: bool,
    /// Record identity -> definition key, named eagerly on entry so a
    /// recursive reference has a stable target before its definition is
    /// complete.
    type_names: Vec<(String, String)>,
    /// Completed definitions, in completion order.
    definitions: Map<String, Value>,
    /// Records currently being generated, bottom is the root.
    generation_stack: Vec<String>,
    root_revisited: bool,
}

impl GenerationContext {
    pub(crate) fn new(options: &GenerateOptions) -> GenerationContext {
        GenerationContext {
            refs: options.refs,
            all_fields_required: options.all_fields_required,
            type_names: Vec::new(),
            definitions: Map::new(),
            generation_stack: Vec::new(),
            root_revisited: false,
        }
    }

    pub(crate) fn use_refs(&self) -> bool {
        self.refs != RefsMode::Inline
    }

    pub(crate) fn all_fields_required(&self) -> bool {
        self.all_fields_required
    }

    pub(crate) fn defs_key(&self) -> &'static str {
        self.refs.defs_key()
    }

    /// The definition key for `record`, recorded on first sight.
    pub(crate) fn assign_name(&mut self, record: &RecordShape) -> String {
        let identity = record.definition_key();
        if let Some((_, name)) = self
            .type_names
            .iter()
            .find(|(existing, _)| *existing == identity)
        {
            return name.clone();
        }
        let name = identity.clone();
        self.type_names.push((identity, name.clone()));
        name
    }

    pub(crate) fn on_stack(&self, identity: &str) -> bool {
        self.generation_stack.iter().any(|entry| entry == identity)
    }

    pub(crate) fn enter(&mut self, identity: String) {
        self.generation_stack.push(identity);
    }

    pub(crate) fn exit(&mut self) {
        self.generation_stack.pop();
    }

    /// Called when generation re-enters a record that is still on the stack;
    /// remembers whether the cycle went all the way back to the root, whose
    /// body is not stored under `definitions` by default.
    pub(crate) fn mark_revisited(&mut self, identity: &str) {
        if self.generation_stack.first().map(String::as_str) == Some(identity) {
            self.root_revisited = true;
        }
    }

    pub(crate) fn root_revisited(&self) -> bool {
        self.root_revisited
    }

    pub(crate) fn has_definition(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub(crate) fn insert_definition(&mut self, name: String, schema: Value) {
        self.definitions.insert(name, schema);
    }

    pub(crate) fn ref_to(&self, name: &str) -> Value {
        let mut object = Map::new();
        object.insert(
            "$ref".to_string(),
            Value::String(format!("#/{}/{}", self.defs_key(), name)),
        );
        Value::Object(object)
    }

    pub(crate) fn has_definitions(&self) -> bool {
        !self.definitions.is_empty()
    }

    pub(crate) fn take_definitions(&mut self) -> Map<String, Value> {
        std::mem::take(&mut self.definitions)
    }
}
