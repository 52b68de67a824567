//! Primary-key identity and the lazily resolved field store.
//!
//! An entity starts with whatever fields it was handed (at least its pk).
//! Reading a field it does not have triggers [`RemoteEntity::resolve`],
//! which performs one request and replaces the whole field map with the
//! response, then the field is read again.
//!
//! Resolution is not memoized: a field the server never returns costs one
//! request per read. Use [`RemoteEntity::peek`] to read without resolving.

use crate::error::{IdentityError, ModelError, ModelResult};
use chrono::{DateTime, Utc};
use pipaw_client::ApiClient;
use pipaw_types::Pk;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::fmt;
use tracing::debug;

/// Sparse attribute bag of an entity.
pub type Fields = Map<String, Value>;

/// Field holding the primary key in every API record.
pub const PK_FIELD: &str = "pk";

/// State shared by every entity kind: the transport handle, the identity
/// and the current field map.
#[derive(Clone)]
pub struct EntityCore<'a> {
    api: &'a dyn ApiClient,
    pk: Pk,
    fields: RefCell<Fields>,
}

impl<'a> EntityCore<'a> {
    /// Builds the core from an explicit pk, initial data, or both.
    ///
    /// The pk is taken from `pk` or from `initial["pk"]`. Fails if neither
    /// is present or if both are present and differ. When only the explicit
    /// pk is given it is written into the fields.
    pub fn new(
        api: &'a dyn ApiClient,
        pk: Option<Pk>,
        initial: Option<Fields>,
    ) -> ModelResult<Self> {
        let mut fields = initial.unwrap_or_default();
        let embedded = match fields.get(PK_FIELD) {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                Pk::from_value(value).ok_or_else(|| IdentityError::InvalidPk(value.to_string()))?,
            ),
        };

        let pk = match (pk, embedded) {
            (Some(given), Some(embedded)) if given != embedded => {
                return Err(IdentityError::PkMismatch { given, embedded }.into());
            }
            (Some(given), _) => given,
            (None, Some(embedded)) => embedded,
            (None, None) => return Err(IdentityError::MissingPk.into()),
        };
        if embedded.is_none() {
            fields.insert(PK_FIELD.to_string(), pk.into());
        }

        Ok(Self {
            api,
            pk,
            fields: RefCell::new(fields),
        })
    }

    /// A core that only knows its pk.
    pub fn stub(api: &'a dyn ApiClient, pk: Pk) -> Self {
        let mut fields = Fields::new();
        fields.insert(PK_FIELD.to_string(), pk.into());
        Self {
            api,
            pk,
            fields: RefCell::new(fields),
        }
    }

    /// A core seeded from a record embedded in another response.
    pub fn seeded(api: &'a dyn ApiClient, fragment: Value) -> ModelResult<Self> {
        Self::new(api, None, Some(into_object(fragment, "entity fragment")?))
    }

    pub fn api(&self) -> &'a dyn ApiClient {
        self.api
    }

    pub fn pk(&self) -> Pk {
        self.pk
    }

    /// Current value of a field, without resolving.
    pub fn peek(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.borrow().contains_key(name)
    }

    /// Copy of the current field map.
    pub fn snapshot(&self) -> Fields {
        self.fields.borrow().clone()
    }

    /// Replaces the whole field map. The pk is left untouched.
    pub fn replace(&self, fields: Fields) {
        *self.fields.borrow_mut() = fields;
    }

    fn field_count(&self) -> usize {
        self.fields.borrow().len()
    }
}

impl fmt::Debug for EntityCore<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCore")
            .field("pk", &self.pk)
            .field("fields", &self.field_count())
            .finish()
    }
}

/// A remote record addressed by primary key whose fields load on demand.
pub trait RemoteEntity<'a> {
    /// Short name used in logs.
    const KIND: &'static str;

    fn core(&self) -> &EntityCore<'a>;

    /// Performs one request and replaces the field map with its result.
    fn resolve(&self) -> ModelResult<()>;

    fn pk(&self) -> Pk {
        self.core().pk()
    }

    /// Reads a field without resolving.
    fn peek(&self, name: &str) -> Option<Value> {
        self.core().peek(name)
    }

    /// Reads a field, resolving once if it is not known yet.
    ///
    /// `Ok(None)` means the field is still absent after resolution.
    fn get(&self, name: &str) -> ModelResult<Option<Value>> {
        if let Some(value) = self.core().peek(name) {
            return Ok(Some(value));
        }
        debug!(entity = Self::KIND, pk = %self.pk(), field = name, "field not loaded, resolving");
        self.resolve()?;
        Ok(self.core().peek(name))
    }

    fn get_or(&self, name: &str, default: Value) -> ModelResult<Value> {
        Ok(self.get(name)?.unwrap_or(default))
    }

    /// Like [`get`](Self::get), but a field absent after resolution is an error.
    fn require(&self, name: &str) -> ModelResult<Value> {
        self.get(name)?
            .ok_or_else(|| ModelError::MissingField(name.to_string()))
    }

    fn get_str(&self, name: &str) -> ModelResult<Option<String>> {
        Ok(self.get(name)?.and_then(|v| v.as_str().map(str::to_string)))
    }

    fn get_u64(&self, name: &str) -> ModelResult<Option<u64>> {
        Ok(self.get(name)?.and_then(|v| v.as_u64()))
    }

    fn get_i64(&self, name: &str) -> ModelResult<Option<i64>> {
        Ok(self.get(name)?.and_then(|v| v.as_i64()))
    }

    fn get_f64(&self, name: &str) -> ModelResult<Option<f64>> {
        Ok(self.get(name)?.and_then(|v| v.as_f64()))
    }

    fn get_bool(&self, name: &str) -> ModelResult<Option<bool>> {
        Ok(self.get(name)?.and_then(|v| v.as_bool()))
    }

    /// Copy of every field currently loaded.
    fn fields(&self) -> Fields {
        self.core().snapshot()
    }
}

pub(crate) fn into_object(value: Value, context: &str) -> ModelResult<Fields> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ModelError::malformed(format!(
            "{context}: expected an object, got {}",
            json_type(&other)
        ))),
    }
}

/// Reads a Unix-seconds field as a UTC timestamp.
pub(crate) fn timestamp_field<'a, E: RemoteEntity<'a>>(
    entity: &E,
    name: &str,
) -> ModelResult<DateTime<Utc>> {
    let value = entity.require(name)?;
    let secs = value
        .as_i64()
        .ok_or_else(|| ModelError::malformed(format!("`{name}` is not an integer: {value}")))?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| ModelError::malformed(format!("`{name}` is out of range: {secs}")))
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Equality, hashing and display by primary key.
macro_rules! entity_identity {
    ($ty:ident) => {
        impl PartialEq for $ty<'_> {
            fn eq(&self, other: &Self) -> bool {
                self.core.pk() == other.core.pk()
            }
        }

        impl Eq for $ty<'_> {}

        impl std::hash::Hash for $ty<'_> {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.core.pk().hash(state);
            }
        }

        impl PartialEq<pipaw_types::Pk> for $ty<'_> {
            fn eq(&self, other: &pipaw_types::Pk) -> bool {
                self.core.pk() == *other
            }
        }

        impl std::fmt::Display for $ty<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}(pk={})", stringify!($ty), self.core.pk())
            }
        }

        impl std::fmt::Debug for $ty<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($ty)).field(&self.core).finish()
            }
        }
    };
}

pub(crate) use entity_identity;
