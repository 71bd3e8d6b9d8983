use std::path::PathBuf;

/// Loads variables from a `.env` file in the current directory or its parents into the process environment. Variables
/// that are already set are kept. A missing `.env` file is not an error: `None` is returned.
pub fn load_dotenv_into_env() -> Option<PathBuf> {
  match dotenvy::dotenv() {
    Ok(path) => {
      tracing::debug!(path = %path.display(), "loaded environment variables from .env file");
      Some(path)
    }
    Err(cause) if cause.not_found() => None,
    Err(cause) => {
      tracing::warn!(%cause, "failed to load .env file; continuing without it");
      None
    }
  }
}

/// Loads variables from the `.env` file at `path` into the process environment. Variables that are already set are
/// kept.
pub fn load_dotenv_file_into_env(path: impl Into<PathBuf>) -> Result<(), dotenvy::Error> {
  let path = path.into();
  dotenvy::from_path(&path)?;
  tracing::debug!(path = %path.display(), "loaded environment variables from .env file");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn loads_file_without_overriding_set_variables() {
    let path = std::env::temp_dir().join(format!("duo_core_env_test_{}.env", std::process::id()));
    std::fs::write(&path, "DUO_ENV_TEST_LOADED=from_file\nDUO_ENV_TEST_KEPT=from_file\n").unwrap();
    std::env::set_var("DUO_ENV_TEST_KEPT", "from_process");

    load_dotenv_file_into_env(&path).unwrap();
    assert_eq!(std::env::var("DUO_ENV_TEST_LOADED").as_deref(), Ok("from_file"));
    assert_eq!(std::env::var("DUO_ENV_TEST_KEPT").as_deref(), Ok("from_process"));

    std::fs::remove_file(&path).unwrap();
    assert!(load_dotenv_file_into_env(&path).unwrap_err().not_found());
  }
}
