//! Form-control markup. Nothing here escapes its input: names, values and
//! labels must already be safe (see [`crate::core::sanitize::safe_string`]).

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectControl {
    pub name: String,
    /// `(value, label)` pairs, rendered in order.
    pub options: Vec<(String, String)>,
    pub current: Option<String>,
    /// Selected only when there is no current value.
    pub default: Option<String>,
    pub id: Option<String>,
    pub classes: Option<String>,
}

impl SelectControl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push((value.into(), label.into()));
        self
    }

    pub fn current(mut self, value: impl Into<String>) -> Self {
        self.current = Some(value.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn classes(mut self, classes: impl Into<String>) -> Self {
        self.classes = Some(classes.into());
        self
    }

    fn selected_value(&self) -> Option<&str> {
        match self.current.as_deref() {
            Some("") | None => self.default.as_deref(),
            current => current,
        }
    }
}

pub fn render_select(control: &SelectControl) -> String {
    let mut html = format!(r#"<select name="{}""#, control.name);
    if let Some(id) = &control.id {
        html.push_str(&format!(r#" id="{}""#, id));
    }
    if let Some(classes) = &control.classes {
        html.push_str(&format!(r#" class="{}""#, classes));
    }
    html.push('>');

    let selected = control.selected_value();
    for (value, label) in &control.options {
        html.push_str(&format!(r#"<option value="{}""#, value));
        if selected == Some(value.as_str()) {
            html.push_str(" selected");
        }
        html.push_str(&format!(">{}</option>", label));
    }

    html.push_str("</select>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> SelectControl {
        SelectControl::new("city")
            .option("msk", "Moscow")
            .option("spb", "Saint Petersburg")
    }

    #[test]
    fn test_render_plain_select() {
        assert_eq!(
            render_select(&cities()),
            r#"<select name="city"><option value="msk">Moscow</option><option value="spb">Saint Petersburg</option></select>"#
        );
    }

    #[test]
    fn test_current_wins_over_default() {
        let html = render_select(&cities().current("spb").default_value("msk"));
        assert!(html.contains(r#"<option value="spb" selected>"#));
        assert!(html.contains(r#"<option value="msk">"#));
    }

    #[test]
    fn test_empty_current_falls_back_to_default() {
        let html = render_select(&cities().current("").default_value("msk"));
        assert!(html.contains(r#"<option value="msk" selected>"#));
    }

    #[test]
    fn test_id_and_classes() {
        let html = render_select(&SelectControl::new("x").id("x-id").classes("form-control wide"));
        assert_eq!(html, r#"<select name="x" id="x-id" class="form-control wide"></select>"#);
    }
}
