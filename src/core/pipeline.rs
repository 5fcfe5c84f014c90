use crate::core::normalizer::Normalizer;
use crate::core::overlap;
use crate::core::{AnalysisResult, ConfigProvider, PairDuration, Pipeline, Storage, WorkPeriod};
use crate::domain::model::ReportDocument;
use crate::utils::error::Result;
use chrono::Local;

pub struct CsvPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CsvPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CsvPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<WorkPeriod>> {
        tracing::debug!("Reading input file: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;

        // 未填結束日期的記錄以 as-of 日期補齊
        let as_of = self
            .config
            .as_of_date()
            .unwrap_or_else(|| Local::now().date_naive());
        tracing::debug!("Resolving open-ended periods as of {}", as_of);

        let normalizer = Normalizer::new(as_of);
        normalizer.normalize_csv(&data)
    }

    async fn transform(&self, records: Vec<WorkPeriod>) -> Result<AnalysisResult> {
        let records_analyzed = records.len();

        let pair_durations = overlap::pair_durations(&records);
        let ranked = overlap::ranked_pairs(&pair_durations);
        let longest =
            overlap::longest_pair(&pair_durations).map(|(pair, days)| PairDuration::from_entry(pair, days));

        if let Some(pair) = &longest {
            tracing::info!(
                "🤝 Longest-working pair: {} and {} ({} days)",
                pair.employee_a,
                pair.employee_b,
                pair.total_days
            );
        }

        // 產生報表 CSV 內容
        let mut csv_lines = vec!["employee_a,employee_b,total_days".to_string()];
        for pair in &ranked {
            csv_lines.push(format!(
                "{},{},{}",
                pair.employee_a, pair.employee_b, pair.total_days
            ));
        }

        Ok(AnalysisResult {
            pair_durations,
            ranked,
            longest,
            records_analyzed,
            csv_output: csv_lines.join("\n"),
        })
    }

    async fn load(&self, result: AnalysisResult) -> Result<String> {
        let formats = self.config.output_formats();

        if formats.iter().any(|f| f == "csv") {
            tracing::debug!("Writing pairs.csv ({} pairs)", result.ranked.len());
            self.storage
                .write_file("pairs.csv", result.csv_output.as_bytes())
                .await?;
        }

        if formats.iter().any(|f| f == "json") {
            let document = ReportDocument {
                longest: result.longest,
                pairs: result.ranked.clone(),
                records_analyzed: result.records_analyzed,
            };
            let json = serde_json::to_string_pretty(&document)?;
            tracing::debug!("Writing report.json ({} bytes)", json.len());
            self.storage.write_file("report.json", json.as_bytes()).await?;
        }

        // 主要輸出行，維持「小ID, 大ID, 天數」格式
        match &result.longest {
            Some(pair) => println!(
                "{}, {}, {}",
                pair.employee_a, pair.employee_b, pair.total_days
            ),
            None => println!("No employees worked together on common projects."),
        }

        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::EmployeePair;
    use crate::utils::error::AnalyzerError;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                AnalyzerError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        output_path: String,
        as_of: Option<NaiveDate>,
        formats: Vec<String>,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                input_path: "input.csv".to_string(),
                output_path: "test_output".to_string(),
                as_of: NaiveDate::from_ymd_opt(2021, 6, 15),
                formats: vec!["csv".to_string(), "json".to_string()],
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn as_of_date(&self) -> Option<NaiveDate> {
            self.as_of
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_extract_reads_and_normalizes() {
        let storage = MockStorage::new();
        storage
            .put_file(
                "input.csv",
                b"143,12,2013-11-01,2014-01-05\n218,10,2012-05-16,NULL\n",
            )
            .await;

        let pipeline = CsvPipeline::new(storage, MockConfig::new());
        let records = pipeline.extract().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].employee_id, 143);
        // NULL end resolved against the configured as-of date.
        assert_eq!(records[1].end, date(2021, 6, 15));
    }

    #[tokio::test]
    async fn test_extract_missing_file_is_fatal() {
        let pipeline = CsvPipeline::new(MockStorage::new(), MockConfig::new());
        let result = pipeline.extract().await;

        assert!(matches!(result, Err(AnalyzerError::IoError(_))));
    }

    #[tokio::test]
    async fn test_transform_builds_full_result() {
        let records = vec![
            WorkPeriod::new(1, 10, date(2020, 1, 1), date(2020, 1, 11)),
            WorkPeriod::new(2, 10, date(2020, 1, 1), date(2020, 1, 11)),
            WorkPeriod::new(3, 10, date(2020, 1, 1), date(2020, 1, 6)),
        ];

        let pipeline = CsvPipeline::new(MockStorage::new(), MockConfig::new());
        let result = pipeline.transform(records).await.unwrap();

        assert_eq!(result.records_analyzed, 3);
        assert_eq!(result.pair_durations.len(), 3);
        assert_eq!(
            result.pair_durations.get(&EmployeePair::new(1, 2)),
            Some(&10)
        );

        let longest = result.longest.unwrap();
        assert_eq!((longest.employee_a, longest.employee_b), (1, 2));
        assert_eq!(longest.total_days, 10);

        let csv_lines: Vec<&str> = result.csv_output.split('\n').collect();
        assert_eq!(csv_lines[0], "employee_a,employee_b,total_days");
        assert_eq!(csv_lines[1], "1,2,10");
        assert_eq!(csv_lines.len(), 4);
    }

    #[tokio::test]
    async fn test_transform_with_no_overlaps() {
        let records = vec![
            WorkPeriod::new(1, 10, date(2020, 1, 1), date(2020, 1, 10)),
            WorkPeriod::new(2, 10, date(2020, 2, 1), date(2020, 2, 10)),
        ];

        let pipeline = CsvPipeline::new(MockStorage::new(), MockConfig::new());
        let result = pipeline.transform(records).await.unwrap();

        assert!(result.pair_durations.is_empty());
        assert!(result.ranked.is_empty());
        assert!(result.longest.is_none());
        assert_eq!(result.csv_output, "employee_a,employee_b,total_days");
    }

    #[tokio::test]
    async fn test_transform_with_empty_input() {
        let pipeline = CsvPipeline::new(MockStorage::new(), MockConfig::new());
        let result = pipeline.transform(vec![]).await.unwrap();

        assert_eq!(result.records_analyzed, 0);
        assert!(result.longest.is_none());
    }

    #[tokio::test]
    async fn test_load_writes_both_artifacts() {
        let storage = MockStorage::new();
        let pipeline = CsvPipeline::new(storage.clone(), MockConfig::new());

        let result = AnalysisResult {
            pair_durations: HashMap::from([(EmployeePair::new(1, 2), 8)]),
            ranked: vec![PairDuration {
                employee_a: 1,
                employee_b: 2,
                total_days: 8,
            }],
            longest: Some(PairDuration {
                employee_a: 1,
                employee_b: 2,
                total_days: 8,
            }),
            records_analyzed: 4,
            csv_output: "employee_a,employee_b,total_days\n1,2,8".to_string(),
        };

        let output_path = pipeline.load(result).await.unwrap();
        assert_eq!(output_path, "test_output");

        let csv = storage.get_file("pairs.csv").await.unwrap();
        assert_eq!(csv, b"employee_a,employee_b,total_days\n1,2,8");

        let json = storage.get_file("report.json").await.unwrap();
        let document: ReportDocument = serde_json::from_slice(&json).unwrap();
        assert_eq!(document.pairs.len(), 1);
        assert_eq!(document.records_analyzed, 4);
        assert_eq!(document.longest.unwrap().total_days, 8);
    }

    #[tokio::test]
    async fn test_load_respects_format_selection() {
        let storage = MockStorage::new();
        let config = MockConfig {
            formats: vec!["json".to_string()],
            ..MockConfig::new()
        };
        let pipeline = CsvPipeline::new(storage.clone(), config);

        let result = AnalysisResult {
            pair_durations: HashMap::new(),
            ranked: vec![],
            longest: None,
            records_analyzed: 0,
            csv_output: "employee_a,employee_b,total_days".to_string(),
        };

        pipeline.load(result).await.unwrap();

        assert!(storage.get_file("pairs.csv").await.is_none());

        let json = storage.get_file("report.json").await.unwrap();
        let document: ReportDocument = serde_json::from_slice(&json).unwrap();
        assert!(document.longest.is_none());
        assert!(document.pairs.is_empty());
    }
}
