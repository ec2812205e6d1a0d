//! The main entry point: an [`Archive`] client that resolves station directories and
//! extracts measurement datasets from the archive's web endpoints.

use crate::error::ArchiveError;
use crate::loader::{ArchiveLoader, DEFAULT_BASE_URL, DEFAULT_LANG};
use crate::measurements::assemble::{ExtractOptions, ReferencePolicy, SchemaPolicy};
use crate::measurements::extractor::MeasurementExtractor;
use crate::stations::resolver::StationResolver;
use crate::types::dataset::Dataset;
use crate::types::station::{StationDirectory, StationRecord};
use crate::types::window::DateWindow;
use bon::bon;
use reqwest::Client;

/// Client for the meteorological web archive.
///
/// Every request is issued sequentially and without a timeout; errors are returned to the
/// caller unchanged, nothing is retried.
///
/// # Examples
///
/// ```no_run
/// # use arso_archive::{Archive, ArchiveError, DateWindow, ReferencePolicy};
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), ArchiveError> {
/// let archive = Archive::builder()
///     .lang("en")
///     .reference(ReferencePolicy::Global)
///     .build();
///
/// let window = DateWindow::new(
///     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
/// )?;
/// let stations = archive.stations(4, window).await?;
/// let dataset = archive.measurements(window, &stations).await?;
/// println!("{}", dataset.to_dataframe()?);
/// # Ok(())
/// # }
/// ```
pub struct Archive {
    resolver: StationResolver,
    extractor: MeasurementExtractor,
}

#[bon]
impl Archive {
    /// Creates a client.
    ///
    /// * `.base_url(..)`: archive root, defaults to the public archive.
    /// * `.lang(..)`: language tag sent with every request, defaults to `si`.
    /// * `.reference(..)`: timestamp reference row, defaults to [`ReferencePolicy::Global`].
    /// * `.schema_policy(..)`: defaults to [`SchemaPolicy::LastStation`].
    /// * `.client(..)`: a preconfigured `reqwest::Client`.
    #[builder]
    pub fn new(
        #[builder(into)] base_url: Option<String>,
        #[builder(into)] lang: Option<String>,
        reference: Option<ReferencePolicy>,
        schema_policy: Option<SchemaPolicy>,
        client: Option<Client>,
    ) -> Self {
        let loader = ArchiveLoader::new(
            client.unwrap_or_default(),
            base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            lang.as_deref().unwrap_or(DEFAULT_LANG),
        );
        let options = ExtractOptions {
            reference: reference.unwrap_or_default(),
            schema_policy: schema_policy.unwrap_or_default(),
        };
        Self {
            resolver: StationResolver::new(loader.clone()),
            extractor: MeasurementExtractor::new(loader, options),
        }
    }

    /// Lists the stations of `station_type` the archive knows for `window`.
    ///
    /// An empty listing is not an error.
    pub async fn stations(
        &self,
        station_type: i32,
        window: DateWindow,
    ) -> Result<StationDirectory, ArchiveError> {
        Ok(self.resolver.resolve(station_type, window).await?)
    }

    /// Fetches the records of every station for `window` and merges them.
    pub async fn measurements(
        &self,
        window: DateWindow,
        stations: &[StationRecord],
    ) -> Result<Dataset, ArchiveError> {
        Ok(self.extractor.extract(window, stations).await?)
    }

    /// Resolves stations and extracts their data in one go.
    ///
    /// `directory_window` overrides the window used for the station listing; the archive
    /// lists some automatic stations only for windows other than the data window.
    ///
    /// ```no_run
    /// # use arso_archive::{Archive, ArchiveError, DateWindow};
    /// # use chrono::NaiveDate;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ArchiveError> {
    /// let archive = Archive::default();
    /// let window = DateWindow::new(
    ///     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
    /// )?;
    /// let dataset = archive
    ///     .fetch_window()
    ///     .station_type(1)
    ///     .window(window)
    ///     .call()
    ///     .await?;
    /// println!("{} rows", dataset.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn fetch_window(
        &self,
        station_type: i32,
        window: DateWindow,
        directory_window: Option<DateWindow>,
    ) -> Result<Dataset, ArchiveError> {
        let stations = self
            .stations(station_type, directory_window.unwrap_or(window))
            .await?;
        self.measurements(window, &stations).await
    }

    pub fn options(&self) -> ExtractOptions {
        self.extractor.options()
    }
}

impl Default for Archive {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let archive = Archive::default();
        assert_eq!(archive.options(), ExtractOptions::default());
    }

    #[test]
    fn builder_applies_policies() {
        let archive = Archive::builder()
            .base_url("http://127.0.0.1:9")
            .reference(ReferencePolicy::PerStation)
            .schema_policy(SchemaPolicy::Strict)
            .build();
        assert_eq!(
            archive.options(),
            ExtractOptions {
                reference: ReferencePolicy::PerStation,
                schema_policy: SchemaPolicy::Strict,
            }
        );
    }
}
