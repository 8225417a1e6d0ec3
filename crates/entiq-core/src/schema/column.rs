use crate::stmt::{Type, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The property name used by application code
    pub name: String,

    /// The name of the column in storage, when it differs from `name`
    pub storage_name: Option<String>,

    /// The column's type
    pub ty: Type,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// True if the column is part of the entity's primary key
    pub primary_key: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            storage_name: None,
            ty,
            nullable: false,
            primary_key: false,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn renamed(mut self, storage_name: impl Into<String>) -> Self {
        self.storage_name = Some(storage_name.into());
        self
    }

    /// The name of the column in storage.
    pub fn storage(&self) -> &str {
        self.storage_name.as_deref().unwrap_or(&self.name)
    }

    /// The value an entity takes for this column when a projection leaves
    /// it out: `Null` for nullable columns, the type's zero value otherwise.
    pub fn fill_value(&self) -> Value {
        if self.nullable {
            return Value::Null;
        }

        match &self.ty {
            Type::Bool => Value::Bool(false),
            Type::I32 => Value::I32(0),
            Type::I64 => Value::I64(0),
            Type::F64 => Value::F64(0.0),
            Type::String => Value::String(String::new()),
            Type::List(_) => Value::List(vec![]),
            Type::Record(fields) => {
                Value::record_from_vec(fields.iter().map(|_| Value::Null).collect())
            }
            Type::Null => Value::Null,
        }
    }
}
