use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Image,
    Graph,
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Text, Modality::Image, Modality::Graph];

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Graph => "graph",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Up to three descriptions of one request. `None` and `""` both mean absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalityInputs {
    pub text: Option<String>,
    pub image: Option<String>,
    pub graph: Option<String>,
}

impl ModalityInputs {
    pub fn new(
        text: Option<impl Into<String>>,
        image: Option<impl Into<String>>,
        graph: Option<impl Into<String>>,
    ) -> Self {
        Self {
            text: text.map(Into::into),
            image: image.map(Into::into),
            graph: graph.map(Into::into),
        }
    }

    pub fn get(&self, modality: Modality) -> Option<&str> {
        let value = match modality {
            Modality::Text => self.text.as_deref(),
            Modality::Image => self.image.as_deref(),
            Modality::Graph => self.graph.as_deref(),
        };
        value.filter(|s| !s.is_empty())
    }

    /// Present modalities in text, image, graph order.
    pub fn present(&self) -> Vec<(Modality, &str)> {
        Modality::ALL
            .iter()
            .filter_map(|m| self.get(*m).map(|value| (*m, value)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }

    /// Present values joined by a single space.
    pub fn combined_description(&self) -> String {
        self.present()
            .into_iter()
            .map(|(_, value)| value)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_description_joins_present_values_in_order() {
        let inputs = ModalityInputs::new(Some("text"), Some("image"), Some("graph"));
        assert_eq!(inputs.combined_description(), "text image graph");
    }

    #[test]
    fn combined_description_skips_absent_and_empty() {
        let inputs = ModalityInputs {
            text: None,
            image: Some(String::new()),
            graph: Some("Eiffel Tower - located in - Paris".to_string()),
        };
        assert_eq!(
            inputs.combined_description(),
            "Eiffel Tower - located in - Paris"
        );
    }

    #[test]
    fn all_absent_is_empty() {
        let inputs = ModalityInputs::default();
        assert!(inputs.is_empty());
        assert_eq!(inputs.combined_description(), "");
        assert!(inputs.present().is_empty());
    }

    #[test]
    fn whitespace_counts_as_present() {
        let inputs = ModalityInputs::new(Some(" "), None::<String>, None::<String>);
        assert_eq!(inputs.present(), vec![(Modality::Text, " ")]);
    }

    #[test]
    fn present_preserves_fixed_order() {
        let inputs = ModalityInputs::new(None::<String>, Some("img"), Some("rel"));
        let order: Vec<Modality> = inputs.present().into_iter().map(|(m, _)| m).collect();
        assert_eq!(order, vec![Modality::Image, Modality::Graph]);
    }

    #[test]
    fn modality_display() {
        assert_eq!(Modality::Graph.to_string(), "graph");
    }
}
