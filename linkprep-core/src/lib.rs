//! Link-prediction dataset preparation: connectivity-preserving train/test
//! edge splitting and negative-edge sampling over sparse undirected graphs.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod dataset;
mod error;
mod graph;
mod key;
mod sample;
mod split;
mod table;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::LinkPredictionDatasetBuilder,
    dataset::LinkPredictionDataset,
    error::{DatasetError, DatasetErrorCode, Result},
    graph::{GraphError, GraphErrorCode, SparseGraph},
    key::{EdgeKey, MAX_NODE_COUNT},
    sample::{
        DEFAULT_WALK_LENGTH, MAX_RESAMPLE_ROUNDS, NegativeEdgeSampler, PairSource, SamplerError,
        SamplerErrorCode, SamplerKind,
    },
    split::{EdgeSplit, SplitError, SplitErrorCode, TrainTestEdgeSplitter},
    table::{EdgeRecord, TargetEdgeTable},
};
