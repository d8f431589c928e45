//! Traits describing the host environment.
//!
//! Oracles expose static data tables, localization and the menu surface. The
//! [`Env`] aggregate bundles them so containers and the factory can reach
//! everything they need without hard coupling to concrete implementations.
mod data;
mod error;
mod menu;
mod text;

pub use data::{BigCraftableData, BuildingData, DataOracle, LocationData};
pub use error::OracleError;
pub use menu::{MenuOracle, MenuRequest, OPEN_CHEST_SOUND};
pub use text::{TextOracle, keys};

/// Aggregates the oracles consumed by storage-core.
pub struct Env<'a, D, T, M>
where
    D: DataOracle + ?Sized,
    T: TextOracle + ?Sized,
    M: MenuOracle + ?Sized,
{
    data: Option<&'a D>,
    text: Option<&'a T>,
    menu: Option<&'a M>,
}

pub type StorageEnv<'a> = Env<'a, dyn DataOracle + 'a, dyn TextOracle + 'a, dyn MenuOracle + 'a>;

impl<D, T, M> Clone for Env<'_, D, T, M>
where
    D: DataOracle + ?Sized,
    T: TextOracle + ?Sized,
    M: MenuOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, T, M> Copy for Env<'_, D, T, M>
where
    D: DataOracle + ?Sized,
    T: TextOracle + ?Sized,
    M: MenuOracle + ?Sized,
{
}

impl<D, T, M> std::fmt::Debug for Env<'_, D, T, M>
where
    D: DataOracle + ?Sized,
    T: TextOracle + ?Sized,
    M: MenuOracle + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("data", &self.data.is_some())
            .field("text", &self.text.is_some())
            .field("menu", &self.menu.is_some())
            .finish()
    }
}

impl<'a, D, T, M> Env<'a, D, T, M>
where
    D: DataOracle + ?Sized,
    T: TextOracle + ?Sized,
    M: MenuOracle + ?Sized,
{
    pub fn new(data: Option<&'a D>, text: Option<&'a T>, menu: Option<&'a M>) -> Self {
        Self { data, text, menu }
    }

    pub fn with_all(data: &'a D, text: &'a T, menu: &'a M) -> Self {
        Self::new(Some(data), Some(text), Some(menu))
    }

    pub fn empty() -> Self {
        Self {
            data: None,
            text: None,
            menu: None,
        }
    }

    /// Returns the DataOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::DataNotAvailable` if no data oracle was provided.
    pub fn data(&self) -> Result<&'a D, OracleError> {
        self.data.ok_or(OracleError::DataNotAvailable)
    }

    /// Returns the TextOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TextNotAvailable` if no text oracle was provided.
    pub fn text(&self) -> Result<&'a T, OracleError> {
        self.text.ok_or(OracleError::TextNotAvailable)
    }

    /// Returns the MenuOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MenuNotAvailable` if no menu oracle was provided.
    pub fn menu(&self) -> Result<&'a M, OracleError> {
        self.menu.ok_or(OracleError::MenuNotAvailable)
    }
}

impl<'a, D, T, M> Env<'a, D, T, M>
where
    D: DataOracle + 'a,
    T: TextOracle + 'a,
    M: MenuOracle + 'a,
{
    /// Converts this environment into a trait-object based `StorageEnv`.
    pub fn into_storage_env(self) -> StorageEnv<'a> {
        let data: Option<&'a dyn DataOracle> = self.data.map(|data| data as _);
        let text: Option<&'a dyn TextOracle> = self.text.map(|text| text as _);
        let menu: Option<&'a dyn MenuOracle> = self.menu.map(|menu| menu as _);
        Env::new(data, text, menu)
    }
}
