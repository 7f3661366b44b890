//! Error handling and processing statistics.
//!
//! This module provides:
//! - Typed errors for initialization, batch process runs and name classification
//! - Processing statistics tracking (errors, warnings, info metrics)
//!
//! Nothing inside the engines is fatal. Faults are absorbed where they happen
//! and counted here so a run can report what it had to drop.

mod stats;
mod types;

// Re-export public API
pub use stats::{log_statistics, ProcessingStats};
pub use types::{
    BatchError, ClassificationError, ErrorType, InfoType, InitializationError, WarningType,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for warning_type in WarningType::iter() {
            assert_eq!(stats.get_warning_count(warning_type), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::QueryFault);
        assert_eq!(stats.get_error_count(ErrorType::QueryFault), 1);

        stats.increment_warning(WarningType::ChunkOverloaded);
        assert_eq!(stats.get_warning_count(WarningType::ChunkOverloaded), 1);

        stats.increment_info(InfoType::CanaryRejected);
        assert_eq!(stats.get_info_count(InfoType::CanaryRejected), 1);
    }

    #[test]
    fn test_processing_stats_bulk_add() {
        let stats = ProcessingStats::new();
        stats.add_info(InfoType::BlacklistedAnswer, 40);
        stats.add_info(InfoType::BlacklistedAnswer, 2);
        stats.add_warning(WarningType::MalformedOutputLine, 3);
        assert_eq!(stats.get_info_count(InfoType::BlacklistedAnswer), 42);
        assert_eq!(stats.get_warning_count(WarningType::MalformedOutputLine), 3);
    }

    #[test]
    fn test_processing_stats_totals() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::QueryFault);
        stats.increment_error(ErrorType::BatchProcessFailed);
        stats.increment_warning(WarningType::ClassificationFailed);
        stats.increment_info(InfoType::ResolverAccepted);

        assert_eq!(stats.total_errors(), 2);
        assert_eq!(stats.total_warnings(), 1);
        assert_eq!(stats.total_info(), 1);
    }

    #[test]
    fn test_error_display_uses_descriptions() {
        assert_eq!(ErrorType::QueryFault.to_string(), "Resolver query fault");
        assert_eq!(
            WarningType::ChunkOverloaded.to_string(),
            "Chunk discarded by overload guard"
        );
        assert_eq!(
            InfoType::HijackRejected.to_string(),
            "Resolver hijacked nonexistent name"
        );
    }

    #[test]
    fn test_batch_error_message_names_binary() {
        let err = BatchError::Spawn {
            binary: "massdns".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("massdns"));
    }
}
