pub struct MseLoss;

impl MseLoss {
    /// Squared error of one example, summed over the output dimensions.
    pub fn sample_error(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter()).map(|(a, b)| (a - b).powi(2)).sum()
    }

    /// Averages an accumulated squared error over `examples`.
    pub fn mean(total: f64, examples: usize) -> f64 {
        total / examples as f64
    }
}
