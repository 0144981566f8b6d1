//! Agent System
//!
//! The two request pipelines behind the HTTP routes:
//!
//! - **File Upload Agent**: validates, stores and measures an uploaded spreadsheet
//! - **Insight Agent**: samples a stored spreadsheet and asks the model for a summary
//!
//! ## Pipeline Overview
//!
//! ```text
//! POST /upload/                        GET /insight/{id}
//!      │                                    │
//!      ▼                                    ▼
//! ┌─────────────┐                    ┌─────────────┐
//! │ File Upload │ → blob + record    │   Insight   │ → record, blob
//! │   Agent     │                    │   Agent     │
//! └─────────────┘                    └─────────────┘
//!                                           │
//!                                           ▼
//!                                    LLM completion
//! ```

pub mod file_upload;
pub mod insight;

pub use file_upload::FileUploadAgent;
pub use insight::InsightAgent;
