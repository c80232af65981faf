//! Value: the small tagged union stored under every key.

use core::fmt;

/// Discriminant of a [`Value`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ValueKind {
    Nil,
    Boolean,
    Integer,
    Real,
    Custom,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Nil => "nil",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Real => "real",
            ValueKind::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Non-owning handle to caller-managed data.
///
/// The table copies the handle around but never dereferences or frees the
/// pointee; keeping it alive is the caller's job. Holding a raw pointer
/// keeps `Custom` (and so `Value`) `!Send + !Sync`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Custom(*mut ());

impl Custom {
    /// The null handle.
    pub const fn null() -> Self {
        Custom(core::ptr::null_mut())
    }

    pub fn from_ptr<T>(ptr: *mut T) -> Self {
        Custom(ptr.cast())
    }

    /// Handle to shared data. It is read-only: writing through the pointer
    /// later returned by [`as_ptr`](Self::as_ptr) is undefined behavior.
    /// Use [`from_mut`](Self::from_mut) when the caller will mutate.
    pub fn from_ref<T>(r: &T) -> Self {
        Custom((r as *const T).cast_mut().cast())
    }

    pub fn from_mut<T>(r: &mut T) -> Self {
        Custom((r as *mut T).cast())
    }

    /// Cast back to a typed pointer. Dereferencing it is up to the caller.
    pub fn as_ptr<T>(self) -> *mut T {
        self.0.cast()
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

/// Returned by the `try_as_*` accessors when the active kind differs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KindError {
    pub expected: ValueKind,
    pub found: ValueKind,
}

impl fmt::Display for KindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "value kind mismatch: expected {}, found {}",
            self.expected, self.found
        )
    }
}

impl std::error::Error for KindError {}

/// Value stored under a key: nil, a boolean, an integer, a real, or a
/// [`Custom`] handle. Defaults to `Nil`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Custom(Custom),
}

impl Value {
    /// The absent-looking value. `HashTable::get` also returns it for
    /// missing keys.
    pub const fn nil() -> Self {
        Value::Nil
    }
    /// Boolean value.
    pub const fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }
    /// Signed 64-bit integer value.
    pub const fn integer(i: i64) -> Self {
        Value::Integer(i)
    }
    /// 64-bit float value.
    pub const fn real(r: f64) -> Self {
        Value::Real(r)
    }
    /// Value carrying a non-owning handle.
    pub const fn custom(c: Custom) -> Self {
        Value::Custom(c)
    }

    /// Which variant is active.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Real(_) => ValueKind::Real,
            Value::Custom(_) => ValueKind::Custom,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }
    pub fn is_real(&self) -> bool {
        matches!(self, Value::Real(_))
    }
    pub fn is_custom(&self) -> bool {
        matches!(self, Value::Custom(_))
    }

    // In-place setters switch the tag together with the payload.
    pub fn set_nil(&mut self) {
        *self = Value::Nil;
    }
    pub fn set_boolean(&mut self, b: bool) {
        *self = Value::Boolean(b);
    }
    pub fn set_integer(&mut self, i: i64) {
        *self = Value::Integer(i);
    }
    pub fn set_real(&mut self, r: f64) {
        *self = Value::Real(r);
    }
    pub fn set_custom(&mut self, c: Custom) {
        *self = Value::Custom(c);
    }

    fn mismatch(&self, expected: ValueKind) -> KindError {
        KindError {
            expected,
            found: self.kind(),
        }
    }

    pub fn try_as_boolean(&self) -> Result<bool, KindError> {
        match *self {
            Value::Boolean(b) => Ok(b),
            _ => Err(self.mismatch(ValueKind::Boolean)),
        }
    }

    pub fn try_as_integer(&self) -> Result<i64, KindError> {
        match *self {
            Value::Integer(i) => Ok(i),
            _ => Err(self.mismatch(ValueKind::Integer)),
        }
    }

    pub fn try_as_real(&self) -> Result<f64, KindError> {
        match *self {
            Value::Real(r) => Ok(r),
            _ => Err(self.mismatch(ValueKind::Real)),
        }
    }

    pub fn try_as_custom(&self) -> Result<Custom, KindError> {
        match *self {
            Value::Custom(c) => Ok(c),
            _ => Err(self.mismatch(ValueKind::Custom)),
        }
    }

    /// Boolean payload.
    ///
    /// # Panics
    /// If the value is not a boolean. Reading the wrong kind is a bug in
    /// the caller, not a recoverable condition; use
    /// [`Value::try_as_boolean`] to branch instead.
    #[track_caller]
    pub fn as_boolean(&self) -> bool {
        match self.try_as_boolean() {
            Ok(x) => x,
            Err(e) => panic!("{e}"),
        }
    }

    /// Integer payload. Panics on any other kind.
    #[track_caller]
    pub fn as_integer(&self) -> i64 {
        match self.try_as_integer() {
            Ok(x) => x,
            Err(e) => panic!("{e}"),
        }
    }

    /// Real payload. Panics on any other kind.
    #[track_caller]
    pub fn as_real(&self) -> f64 {
        match self.try_as_real() {
            Ok(x) => x,
            Err(e) => panic!("{e}"),
        }
    }

    /// Custom handle. Panics on any other kind.
    #[track_caller]
    pub fn as_custom(&self) -> Custom {
        match self.try_as_custom() {
            Ok(x) => x,
            Err(e) => panic!("{e}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

impl From<Custom> for Value {
    fn from(c: Custom) -> Self {
        Value::Custom(c)
    }
}
