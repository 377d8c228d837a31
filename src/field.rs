use std::collections::BTreeMap;
use std::fmt;

/// Notification emitted on a form field after its value is rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// Content changed
    Input,
    /// Change committed
    Change,
}

impl fmt::Display for FieldEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldEvent::Input => write!(f, "input"),
            FieldEvent::Change => write!(f, "change"),
        }
    }
}

/// Callback invoked with each dispatched event and the field value at that moment
pub type Listener = Box<dyn FnMut(FieldEvent, &str)>;

/// The original form field: holds the submitted value and its declared attributes.
///
/// Once a tag controller takes it over the field is hidden and leaves the tab
/// order, but it keeps the delimiter-joined value that gets submitted.
pub struct FormField {
    name: String,
    value: String,
    attributes: BTreeMap<String, String>,
    hidden: bool,
    tab_index: i32,
    listeners: Vec<Listener>,
}

impl fmt::Debug for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormField")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("attributes", &self.attributes)
            .field("hidden", &self.hidden)
            .field("tab_index", &self.tab_index)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl FormField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            attributes: BTreeMap::new(),
            hidden: false,
            tab_index: 0,
            listeners: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Declare an attribute. Boolean attributes are declared with an empty value.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in attributes {
            self = self.with_attribute(name, value);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the stored value without notifying listeners
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// The `type` attribute, `text` when undeclared
    pub fn input_type(&self) -> &str {
        self.attribute("type").unwrap_or("text")
    }

    /// Hide the field and drop it from the tab order
    pub fn hide(&mut self) {
        self.hidden = true;
        self.tab_index = -1;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn tab_index(&self) -> i32 {
        self.tab_index
    }

    pub fn subscribe(&mut self, listener: impl FnMut(FieldEvent, &str) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn dispatch(&mut self, event: FieldEvent) {
        for listener in self.listeners.iter_mut() {
            listener(event, &self.value);
        }
    }
}
