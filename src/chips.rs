use crate::tags::TagSet;

/// One rendered tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    /// Literal text shown on the chip
    pub text: String,
    /// Tag this chip stands for; clicks resolve through it
    pub tag: String,
}

impl Chip {
    fn for_tag(tag: &str) -> Self {
        Self {
            text: tag.to_string(),
            tag: tag.to_string(),
        }
    }

    /// Width in cells including one column of padding on each side
    pub fn width(&self) -> u16 {
        u16::try_from(self.text.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
    }

    pub fn label(&self) -> String {
        format!(" {} ", self.text)
    }
}

/// The chip view of a tag set, rebuilt wholesale on every render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipList {
    chips: Vec<Chip>,
}

impl ChipList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tear down every chip and recreate one per tag, in tag order
    pub fn rebuild(&mut self, tags: &TagSet) {
        self.chips.clear();
        self.chips.extend(tags.iter().map(Chip::for_tag));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chip> {
        self.chips.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Chip> {
        self.chips.get(index)
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }
}
