use anyhow::{anyhow, Result};

pub fn validate_base_url(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("api base url is empty"));
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(anyhow!("api base url must start with http:// or https://"));
    }
    Ok(())
}
