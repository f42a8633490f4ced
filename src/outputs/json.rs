//! JSON run report for the presentation layer.

use crate::models::WatchReport;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Write the run report as `report.json` under the output directory.
///
/// The directory is created if needed; the previous run's report is
/// overwritten (results are not persisted across runs).
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_report(
    report: &WatchReport,
    output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    fs::create_dir_all(output_dir).await?;
    let path = Path::new(output_dir).join("report.json");
    fs::write(&path, json).await?;

    info!(path = %path.display(), articles = report.articles.len(), "Wrote watch report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, GazetteArtifacts};

    #[tokio::test]
    async fn report_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let report = WatchReport {
            generated_at: "2026-08-27T10:00:00+02:00".to_string(),
            articles: vec![Article {
                title: "Titel".to_string(),
                body: "Zeile eins\nZeile zwei".to_string(),
                url: "https://www.berlin.de/pressemitteilung.1.php".to_string(),
            }],
            gazette: Some(GazetteArtifacts {
                label: "Amtsblatt_Nr._12".to_string(),
                pdf_url: "https://www.berlin.de/a/12.pdf".to_string(),
                pdf_path: Some("downloads/Amtsblatt_Nr._12/Amtsblatt_Nr._12.pdf".to_string()),
                page_images: vec!["downloads/Amtsblatt_Nr._12/page_5.png".to_string()],
            }),
        };

        let path = write_report(&report, dir.path().to_str().unwrap())
            .await
            .unwrap();
        let raw = std::fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["articles"][0]["title"], "Titel");
        assert_eq!(value["gazette"]["label"], "Amtsblatt_Nr._12");
        assert_eq!(
            value["gazette"]["page_images"][0],
            "downloads/Amtsblatt_Nr._12/page_5.png"
        );
    }

    #[tokio::test]
    async fn empty_run_still_produces_a_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = WatchReport {
            generated_at: "2026-08-27T10:00:00+02:00".to_string(),
            articles: Vec::new(),
            gazette: None,
        };

        let path = write_report(&report, dir.path().to_str().unwrap())
            .await
            .unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(value["articles"].as_array().unwrap().is_empty());
        assert!(value["gazette"].is_null());
    }
}
