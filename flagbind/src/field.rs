//! Declaration-ordered field bindings.
//!
//! `#[derive(Flags)]` lists every named field of a struct together with its
//! tag text and a borrow of its storage. Field types that do not implement
//! [`Value`] are still listed, carrying an [`Unsupported`] marker, so the
//! registrar can report them at registration time.

use std::any::type_name;

use crate::value::Value;

/// One field of a [`Flags`] struct.
pub struct Field<V> {
    /// Field identifier as declared.
    pub ident: &'static str,
    /// Tag text from `#[flag("...")]`, empty when the field has no tag.
    pub tag: &'static str,
    /// Whether the field was marked `#[flag(rest)]`.
    pub rest: bool,
    /// Borrow of the field's storage, or the reason it cannot be bound.
    pub value: Result<V, Unsupported>,
}

/// Field borrowed for reading.
pub type FieldRef<'a> = Field<&'a dyn Value>;

/// Field borrowed for binding to a flag-set.
pub type FieldMut<'a> = Field<&'a mut dyn Value>;

/// Marker for a field whose type does not implement [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unsupported {
    type_name: &'static str,
}

impl Unsupported {
    /// Marker naming `T`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self {
            type_name: type_name::<T>(),
        }
    }

    /// Name of the unsupported type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Structs whose fields can be bound to command-line flags.
///
/// Implement it with `#[derive(Flags)]`; the generated methods list the
/// struct's named fields in declaration order.
///
/// # Examples
///
/// ```
/// use flagbind::Flags;
///
/// #[derive(Flags, Default)]
/// struct Options {
///     #[flag("--name=NAME who to greet")]
///     name: String,
///     #[flag("-v be verbose")]
///     verbose: bool,
/// }
///
/// let options = Options::default();
/// let idents: Vec<_> = options.fields().iter().map(|field| field.ident).collect();
/// assert_eq!(idents, ["name", "verbose"]);
/// ```
pub trait Flags {
    /// Fields in declaration order, borrowed for reading.
    fn fields(&self) -> Vec<FieldRef<'_>>;

    /// Fields in declaration order, borrowed for binding.
    fn fields_mut(&mut self) -> Vec<FieldMut<'_>>;

    /// Resets every field tagged `-` to its default value.
    fn reset_excluded(&mut self) {}
}

/// The empty option set, handy when usage output has no options to show.
impl Flags for () {
    fn fields(&self) -> Vec<FieldRef<'_>> {
        Vec::new()
    }

    fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
        Vec::new()
    }
}

/// Autoref-specialised binding used by the derive macro.
///
/// `(&Probe::<T>::new()).bind(field)` resolves to [`BindValue`] when
/// `T: Value` and to [`BindFallback`] otherwise.
pub mod probe {
    use std::marker::PhantomData;

    use super::Unsupported;
    use crate::value::Value;

    /// Zero-sized selector for a field type.
    pub struct Probe<T>(PhantomData<T>);

    impl<T> Probe<T> {
        /// Creates the selector.
        #[must_use]
        pub const fn new() -> Self {
            Self(PhantomData)
        }
    }

    /// Binding for field types implementing [`Value`].
    pub trait BindValue {
        /// Field type.
        type Field;

        /// Borrows `field` for reading.
        ///
        /// # Errors
        ///
        /// Never fails for this implementation.
        fn bind<'a>(&self, field: &'a Self::Field) -> Result<&'a dyn Value, Unsupported>;

        /// Borrows `field` for binding.
        ///
        /// # Errors
        ///
        /// Never fails for this implementation.
        fn bind_mut<'a>(
            &self,
            field: &'a mut Self::Field,
        ) -> Result<&'a mut dyn Value, Unsupported>;
    }

    impl<T: Value> BindValue for Probe<T> {
        type Field = T;

        fn bind<'a>(&self, field: &'a T) -> Result<&'a dyn Value, Unsupported> {
            Ok(field)
        }

        fn bind_mut<'a>(&self, field: &'a mut T) -> Result<&'a mut dyn Value, Unsupported> {
            Ok(field)
        }
    }

    /// Binding for every other field type.
    pub trait BindFallback {
        /// Field type.
        type Field;

        /// Reports the field type as unsupported.
        ///
        /// # Errors
        ///
        /// Always returns [`Unsupported`].
        fn bind<'a>(&self, field: &'a Self::Field) -> Result<&'a dyn Value, Unsupported>;

        /// Reports the field type as unsupported.
        ///
        /// # Errors
        ///
        /// Always returns [`Unsupported`].
        fn bind_mut<'a>(
            &self,
            field: &'a mut Self::Field,
        ) -> Result<&'a mut dyn Value, Unsupported>;
    }

    impl<T> BindFallback for &Probe<T> {
        type Field = T;

        fn bind<'a>(&self, _field: &'a T) -> Result<&'a dyn Value, Unsupported> {
            Err(Unsupported::of::<T>())
        }

        fn bind_mut<'a>(&self, _field: &'a mut T) -> Result<&'a mut dyn Value, Unsupported> {
            Err(Unsupported::of::<T>())
        }
    }
}
