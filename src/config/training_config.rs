//! Training job settings. Hard-coded: the job takes no flags, files or environment.

/// Fixed configuration of the training job
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingJobConfig {
    /// Cloud project the job is billed to; informational only
    pub project_id: String,
    pub tracking_uri: String,
    pub experiment_name: String,
    pub model_name: String,
    /// Placeholder for a remote copy of the dataset; the embedded dataset is used instead
    pub data_bucket: String,
    pub test_size: f64,
    pub random_state: u64,
}

impl Default for TrainingJobConfig {
    fn default() -> Self {
        Self {
            project_id: "YOUR_GCP_PROJECT_ID".to_string(),
            tracking_uri: "file:./mlruns".to_string(),
            experiment_name: "Iris_Classification".to_string(),
            model_name: "IrisLogisticRegressionModel".to_string(),
            data_bucket: "your-gcs-data-bucket-name".to_string(),
            test_size: 0.2,
            random_state: 42,
        }
    }
}
