pub mod common;
pub mod centrality;
pub mod community;

pub use common::{GraphView, NodeId};
pub use centrality::degree_centrality;
pub use community::{greedy_modularity, label_propagation, modularity, CommunityResult};
