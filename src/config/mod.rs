//! Configuration - cluster settings and the program registry.

pub mod cluster;
pub mod programs;

pub use cluster::{validate_cluster_config, ClusterConfig, ClusterName, Commitment};
pub use programs::{ProgramAddress, ProgramRegistry};
