//! Synthetic growth-curve generation.
//!
//! Models the aperture flux of a star with a circular Gaussian PSF on top of a
//! residual sky level:
//!
//! `F(r) = F_tot · (1 − exp(−r² / 2σ²)) + sky · π r²`
//!
//! Noise is Gaussian with `σ_F = sqrt(max(|F|, 1))` (photon noise in ADU at
//! unit gain). Output is deterministic for a given seed.

use std::f64::consts::PI;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{SampleConfig, Series};
use crate::error::{AppError, EXIT_INPUT, EXIT_OUTPUT};

/// FWHM = 2·sqrt(2·ln 2)·σ for a Gaussian.
const FWHM_PER_SIGMA: f64 = 2.354_820_045_030_949;

pub fn generate_sample(config: &SampleConfig) -> Result<Series, AppError> {
    if config.points == 0 {
        return Err(AppError::new(EXIT_INPUT, "Sample point count must be > 0."));
    }
    if !(config.step.is_finite() && config.step > 0.0) {
        return Err(AppError::new(EXIT_INPUT, "Radius step must be a positive number."));
    }
    if !(config.fwhm.is_finite() && config.fwhm > 0.0) {
        return Err(AppError::new(EXIT_INPUT, "FWHM must be a positive number."));
    }
    if !(config.total_flux.is_finite() && config.total_flux >= 0.0) {
        return Err(AppError::new(EXIT_INPUT, "Total flux must be a non-negative number."));
    }
    if !config.sky.is_finite() {
        return Err(AppError::new(EXIT_INPUT, "Sky level must be finite."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Noise distribution error: {e}")))?;

    let sigma = config.fwhm / FWHM_PER_SIGMA;

    let mut radius = Vec::with_capacity(config.points);
    let mut flux = Vec::with_capacity(config.points);
    let mut errors = Vec::with_capacity(config.points);

    for i in 1..=config.points {
        let r = i as f64 * config.step;
        let expected = growth_model(r, sigma, config.total_flux, config.sky);
        let noise = expected.abs().max(1.0).sqrt();

        radius.push(r);
        flux.push(expected + noise * normal.sample(&mut rng));
        errors.push(noise);
    }

    log::debug!(
        "generated {} samples (seed={}, fwhm={} px)",
        radius.len(),
        config.seed,
        config.fwhm
    );

    Ok(Series {
        radius,
        flux,
        flux_err: config.with_errors.then_some(errors),
    })
}

/// Noise-free enclosed flux at aperture radius `r`.
pub fn growth_model(r: f64, sigma: f64, total_flux: f64, sky: f64) -> f64 {
    let enclosed = 1.0 - (-(r * r) / (2.0 * sigma * sigma)).exp();
    total_flux * enclosed + sky * PI * r * r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_curve() {
        let cfg = SampleConfig::default();
        let a = generate_sample(&cfg).unwrap();
        let b = generate_sample(&cfg).unwrap();
        assert_eq!(a, b);

        let c = generate_sample(&SampleConfig { seed: 7, ..cfg }).unwrap();
        assert_ne!(a.flux, c.flux);
        assert_eq!(a.radius, c.radius);
    }

    #[test]
    fn curve_saturates_at_total_flux() {
        let cfg = SampleConfig::default();
        let s = generate_sample(&cfg).unwrap();
        assert_eq!(s.len(), cfg.points);
        assert!(s.flux_err.is_none());

        let last = *s.flux.last().unwrap();
        let tolerance = 5.0 * cfg.total_flux.sqrt();
        assert!(
            (last - cfg.total_flux).abs() < tolerance,
            "last={last} total={}",
            cfg.total_flux
        );
        // Inner aperture holds well under half the light for FWHM=4 at r=1.
        assert!(s.flux[0] < 0.5 * cfg.total_flux);
    }

    #[test]
    fn growth_model_half_light_at_hwhm_scale() {
        // Enclosed fraction at r = σ·sqrt(2 ln 2) is exactly one half.
        let sigma = 2.0;
        let r = sigma * (2.0 * 2.0_f64.ln()).sqrt();
        let f = growth_model(r, sigma, 1000.0, 0.0);
        assert!((f - 500.0).abs() < 1e-9);
        assert!((growth_model(0.0, sigma, 1000.0, 3.0)).abs() < 1e-12);
    }

    #[test]
    fn errors_are_emitted_on_request() {
        let cfg = SampleConfig {
            with_errors: true,
            points: 5,
            ..SampleConfig::default()
        };
        let s = generate_sample(&cfg).unwrap();
        let errs = s.flux_err.unwrap();
        assert_eq!(errs.len(), 5);
        assert!(errs.iter().all(|e| *e >= 1.0));
    }

    #[test]
    fn rejects_bad_parameters() {
        let bad = [
            SampleConfig { points: 0, ..SampleConfig::default() },
            SampleConfig { step: 0.0, ..SampleConfig::default() },
            SampleConfig { fwhm: -1.0, ..SampleConfig::default() },
            SampleConfig { total_flux: f64::NAN, ..SampleConfig::default() },
            SampleConfig { sky: f64::INFINITY, ..SampleConfig::default() },
        ];
        for cfg in bad {
            let err = generate_sample(&cfg).unwrap_err();
            assert_eq!(err.exit_code(), EXIT_INPUT);
        }
    }
}
