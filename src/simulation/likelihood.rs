//! Likelihood ratios.
//!
//! This module computes, for each received sample `y`, the likelihood ratio
//! `P(y | bit = 1) / P(y | bit = 0)` given the channel model. Values are not
//! clipped, so very reliable samples can give infinite or zero ratios.

use super::channel::{Channel, Observations};

/// Likelihood ratio of a bit received through a BSC.
pub fn bsc(error_prob: f64, y: u8) -> f64 {
    if y == 1 {
        (1.0 - error_prob) / error_prob
    } else {
        error_prob / (1.0 - error_prob)
    }
}

/// Likelihood ratio of a sample received through an AWGN channel.
pub fn awgn(std_dev: f64, y: f64) -> f64 {
    (2.0 * y / (std_dev * std_dev)).exp()
}

/// Likelihood ratio of a sample received through an AWLN channel.
pub fn awln(width: f64, y: f64) -> f64 {
    logistic_density(width, y - 1.0) / logistic_density(width, y + 1.0)
}

// Logistic density up to a constant factor
fn logistic_density(width: f64, z: f64) -> f64 {
    let e = (-z / width).exp();
    1.0 / ((1.0 + e) * (1.0 + 1.0 / e))
}

/// Computes the likelihood ratios of the observations.
///
/// One ratio is computed for each element of `lratios`, using the first
/// `lratios.len()` observations.
///
/// # Panics
///
/// Panics if there are fewer observations than ratios, or if the kind of
/// observations does not match the channel.
pub fn likelihood_ratios(channel: &Channel, observations: &Observations, lratios: &mut [f64]) {
    assert!(observations.len() >= lratios.len());
    match (*channel, observations) {
        (Channel::Bsc { error_prob }, Observations::Hard(received)) => {
            for (lr, &y) in lratios.iter_mut().zip(received.iter()) {
                *lr = bsc(error_prob, y);
            }
        }
        (Channel::Awgn { std_dev }, Observations::Soft(received)) => {
            for (lr, &y) in lratios.iter_mut().zip(received.iter()) {
                *lr = awgn(std_dev, y);
            }
        }
        (Channel::Awln { width }, Observations::Soft(received)) => {
            for (lr, &y) in lratios.iter_mut().zip(received.iter()) {
                *lr = awln(width, y);
            }
        }
        (channel, _) => panic!("wrong kind of observations for {} channel", channel.name()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bsc_reciprocal() {
        for &p in &[0.01, 0.1, 0.3] {
            let r = bsc(p, 1) * bsc(p, 0);
            assert!((r - 1.0).abs() < 1e-12);
        }
        assert!((bsc(0.2, 1) - 4.0).abs() < 1e-12);
        assert_eq!(bsc(0.5, 0), 1.0);
    }

    #[test]
    fn awgn_monotone() {
        let ys: Vec<f64> = (-20..=20).map(|k| 0.1 * k as f64).collect();
        for w in ys.windows(2) {
            assert!(awgn(0.8, w[0]) < awgn(0.8, w[1]));
        }
        assert_eq!(awgn(0.8, 0.0), 1.0);
        assert!((awgn(1.0, 0.5) - 1f64.exp()).abs() < 1e-12);
    }

    #[test]
    fn awln_values() {
        assert!((awln(0.5, 0.0) - 1.0).abs() < 1e-12);
        assert!(awln(0.5, 0.3) > 1.0);
        assert!(awln(0.5, -0.3) < 1.0);
        // symmetry: L(-y) = 1 / L(y)
        assert!((awln(0.7, -0.4) * awln(0.7, 0.4) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ratios() {
        let obs = Observations::Soft(vec![1.0, -1.0, 0.0, 2.0]);
        let mut lratios = [0.0; 3];
        likelihood_ratios(&Channel::Awgn { std_dev: 1.0 }, &obs, &mut lratios);
        assert!((lratios[0] - 2f64.exp()).abs() < 1e-12);
        assert!((lratios[1] - (-2f64).exp()).abs() < 1e-12);
        assert_eq!(lratios[2], 1.0);

        let obs = Observations::Hard(vec![1, 0, 0]);
        likelihood_ratios(&Channel::Bsc { error_prob: 0.2 }, &obs, &mut lratios);
        assert!((lratios[0] - 4.0).abs() < 1e-12);
        assert!((lratios[1] - 0.25).abs() < 1e-12);
    }
}
