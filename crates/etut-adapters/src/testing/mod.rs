mod failing_exporter;

pub use failing_exporter::FailingExporter;
