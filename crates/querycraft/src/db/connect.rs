use querycraft_core::{
    async_trait,
    driver::{Connection, Dialect, Driver},
    Error, Result,
};

use url::Url;

/// Driver picked from a connection URL's scheme.
#[derive(Debug)]
pub(super) struct Connect {
    driver: Box<dyn Driver>,
}

impl Connect {
    pub(super) fn new(url: &str) -> Result<Connect> {
        let parsed = Url::parse(url).map_err(|err| {
            Error::configuration(format!("invalid connection URL `{url}`: {err}"))
        })?;

        let driver = match parsed.scheme() {
            "sqlite" => sqlite(url)?,
            scheme => {
                return Err(Error::configuration(format!(
                    "unsupported database; scheme={scheme}; url={url}"
                )))
            }
        };

        Ok(Connect { driver })
    }
}

#[async_trait]
impl Driver for Connect {
    fn dialect(&self) -> Dialect {
        self.driver.dialect()
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        self.driver.connect().await
    }
}

#[cfg(feature = "sqlite")]
fn sqlite(url: &str) -> Result<Box<dyn Driver>> {
    Ok(Box::new(querycraft_driver_sqlite::Sqlite::new(url)?))
}

#[cfg(not(feature = "sqlite"))]
fn sqlite(_url: &str) -> Result<Box<dyn Driver>> {
    Err(Error::configuration("`sqlite` feature not enabled"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scheme_is_configuration_error() {
        let err = Connect::new("oracle://localhost/db").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("scheme=oracle"));
    }

    #[test]
    fn malformed_url_is_configuration_error() {
        let err = Connect::new("not a url").unwrap_err();
        assert!(err.is_configuration());
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn sqlite_scheme_opens_a_sqlite_connection() {
        let driver = Connect::new("sqlite::memory:").unwrap();
        assert_eq!(driver.dialect(), Dialect::Sqlite);

        let connection = driver.connect().await.unwrap();
        assert_eq!(connection.dialect(), Dialect::Sqlite);
    }

    #[cfg(not(feature = "sqlite"))]
    #[test]
    fn sqlite_scheme_needs_the_feature() {
        let err = Connect::new("sqlite::memory:").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("`sqlite` feature"));
    }
}
