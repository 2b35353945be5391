use crate::cli::OutputFormat;

mod human;
mod json;

pub(crate) trait OutputFormatter: Send + Sync {
    fn print_run(
        &self,
        report: &surge_core::runner::RunReport,
        verdict: &surge_core::runner::SlaVerdict,
    ) -> anyhow::Result<()>;

    fn print_ramp(
        &self,
        report: &surge_core::runner::DegradationReport,
        verdict: &surge_core::runner::SlaVerdict,
    ) -> anyhow::Result<()>;
}

pub(crate) fn formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::HumanReadable => Box::new(human::HumanReadableOutput),
        OutputFormat::Json => Box::new(json::JsonOutput),
    }
}
