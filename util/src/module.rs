//! Cyclic component interface
//!
//! A cyclic component is configured once from static parameters and then processed once per
//! control period. Processing returns both the component's output and a status report; the
//! report describes what happened during the period (degraded inputs, fallbacks taken) without
//! being part of the output itself.

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A component run once per control period.
pub trait State {
    /// Static parameters, given once before the first period.
    type InitData;
    /// Rejection of the static parameters.
    type InitError;

    /// Data for a single period.
    type InputData;
    type OutputData;
    type StatusReport;

    /// Failure of a single period.
    ///
    /// Components which must keep running through every anomaly use
    /// `std::convert::Infallible`.
    type ProcError;

    /// Validate and store the static parameters.
    ///
    /// May be called again to reconfigure the component, in which case any state carried
    /// between periods is reset.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError>;

    /// Process one period.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}
