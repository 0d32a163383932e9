// schema.rs: field descriptors and ordered row schemas with name -> index resolution
/// Data kind a schema field declares for its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Number,
    Boolean,
}

/// One schema descriptor: a field name plus its declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldMeta {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self { name: name.into(), kind }
    }
}

/// Ordered sequence of field descriptors describing a row's shape.
///
/// Positions are stable: a cell at index `i` belongs to the descriptor at
/// index `i`. Lookups are by exact name; the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSchema {
    fields: Vec<FieldMeta>,
}

impl RowSchema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn from_fields(fields: Vec<FieldMeta>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn push(&mut self, field: FieldMeta) {
        self.fields.push(field);
    }

    pub fn field(&self, idx: usize) -> Option<&FieldMeta> {
        self.fields.get(idx)
    }

    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    /// Positional index of the first field with exactly this name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Copy of this schema with one more trailing descriptor.
    pub fn with_appended(&self, field: FieldMeta) -> RowSchema {
        let mut fields = self.fields.clone();
        fields.push(field);
        Self { fields }
    }
}
