use std::path::Path;

use anyhow::{bail, Context, Result};
use mapregion::{
    overlay::{Resolution, STATE_VERSION},
    OverlayResolver, PersistedState, RegionCatalog, RegionSource,
};
use serde_json::json;

use crate::cli::ResolveArgs;

pub async fn run<S: RegionSource>(catalog: &RegionCatalog<S>, args: &ResolveArgs) -> Result<()> {
    if !args.force && args.output.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", args.output.display());
    }

    let bytes = tokio::fs::read(&args.state).await
        .with_context(|| format!("read {}", args.state.display()))?;
    let state = PersistedState::from_json_slice(&bytes)?;
    if !state.is_current() {
        bail!("{} has state version {}, expected {STATE_VERSION}", args.state.display(), state.version);
    }

    eprintln!("[resolve] restoring {} overlays", state.overlays.len());
    let resolution = OverlayResolver::new(catalog.clone()).resolve(state.overlays).await;
    write_geojson(&resolution, &args.output).await?;

    eprintln!(
        "[resolve] wrote {} overlays to {} ({} dropped)",
        resolution.overlays.len(),
        args.output.display(),
        resolution.dropped,
    );
    Ok(())
}

async fn write_geojson(resolution: &Resolution, path: &Path) -> Result<()> {
    let features = resolution.overlays.iter()
        .map(|overlay| overlay.to_feature_value())
        .collect::<Result<Vec<_>>>()?;
    let collection = json!({ "type": "FeatureCollection", "features": features });

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    tokio::fs::write(path, serde_json::to_vec(&collection)?).await
        .with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use mapregion::MemSource;

    use super::*;

    #[tokio::test]
    async fn refuses_other_versions_and_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.json");
        let output = dir.path().join("out.geojson");
        std::fs::write(&state, r#"{ "version": 99, "overlays": [] }"#).unwrap();
        let catalog = RegionCatalog::new(MemSource::new());

        let args = ResolveArgs { state: state.clone(), output: output.clone(), force: false };
        assert!(run(&catalog, &args).await.is_err());

        std::fs::write(&state, r#"{ "version": 1, "overlays": [{ "id": 1, "kind": "country", "name": "Atlantis" }] }"#).unwrap();
        run(&catalog, &args).await.unwrap();
        let written: serde_json::Value = serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(written["features"].as_array().unwrap().len(), 0);

        assert!(run(&catalog, &args).await.is_err());
        let args = ResolveArgs { force: true, ..args };
        run(&catalog, &args).await.unwrap();
    }
}
