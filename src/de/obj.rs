//! Utilities for reading [Wavefront OBJ](https://en.wikipedia.org/wiki/Wavefront_.obj_file) data
//! as [RawAttributes], via [tobj].
//!
//! # Notes
//!
//! * Data is loaded without unifying indices (tobj's `single_index`), so positions and normals keep
//!   their own index lists; welding is left to [Mesh::build](crate::Mesh::build).
//! * Points and lines are ignored.
//! * [load] and [parse] merge a file's models into one stream; attributes shared between models
//!   keep a single index, see [merge].
//! * Materials are irrelevant to mesh construction. Failure to load a material library is reported
//!   as a warning and otherwise ignored.

use std::{io::BufRead, path::Path};

use crate::{error::MalformedInput, RawAttributes};

/// Errors related to loading OBJ data.
#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error(transparent)]
    Load(#[from] tobj::LoadError),
    #[error("model {name:?}: {source}")]
    Model {
        name: String,
        #[source]
        source: MalformedInput,
    },
}

/// Options controlling how OBJ data is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjOptions {
    /// Split polygons into triangle fans. If unset, faces keep their original arity.
    pub triangulate: bool,
}

impl Default for ObjOptions {
    fn default() -> Self {
        Self { triangulate: true }
    }
}

impl ObjOptions {
    fn to_tobj(self) -> tobj::LoadOptions {
        tobj::LoadOptions {
            single_index: false,
            triangulate: self.triangulate,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        }
    }
}

impl TryFrom<&tobj::Mesh> for RawAttributes {
    type Error = MalformedInput;
    fn try_from(mesh: &tobj::Mesh) -> Result<Self, Self::Error> {
        RawAttributes::from_flat(
            &mesh.positions,
            &mesh.normals,
            &mesh.indices,
            &mesh.normal_indices,
            &mesh.face_arities,
        )
    }
}

/// A named attribute stream read from an OBJ file.
#[derive(Debug, Clone)]
pub struct ObjModel {
    pub name: String,
    pub attributes: RawAttributes,
}

fn convert(
    (models, materials): (Vec<tobj::Model>, Result<Vec<tobj::Material>, tobj::LoadError>),
) -> Result<Vec<ObjModel>, ObjError> {
    if let Err(e) = materials {
        tracing::warn!(error = %e, "couldn't load OBJ materials; ignoring");
    }
    models
        .into_iter()
        .map(|model| {
            tracing::trace!(
                name = model.name.as_str(),
                positions = model.mesh.positions.len() / 3,
                normals = model.mesh.normals.len() / 3,
                corners = model.mesh.indices.len(),
                "converting OBJ model"
            );
            match RawAttributes::try_from(&model.mesh) {
                Ok(attributes) => Ok(ObjModel {
                    name: model.name,
                    attributes,
                }),
                Err(source) => Err(ObjError::Model {
                    name: model.name,
                    source,
                }),
            }
        })
        .collect()
}

/// Merge the attribute streams of several models into one, in order.
///
/// tobj indexes each model's attributes separately, so a `v` or `vn` line used by several groups
/// arrives once per group. Models are joined with [RawAttributes::append_shared], which gives
/// those copies one index again; faces in different groups that share an edge therefore weld
/// across it.
pub fn merge(models: impl IntoIterator<Item = ObjModel>) -> Result<RawAttributes, ObjError> {
    models
        .into_iter()
        .try_fold(RawAttributes::default(), |mut acc, model| {
            match acc.append_shared(model.attributes) {
                Ok(()) => Ok(acc),
                Err(source) => Err(ObjError::Model {
                    name: model.name,
                    source,
                }),
            }
        })
}

/// Load every model in an OBJ file as its own attribute stream.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_models(path: impl AsRef<Path>, opts: &ObjOptions) -> Result<Vec<ObjModel>, ObjError> {
    tracing::debug!("loading OBJ file");
    convert(tobj::load_obj(path.as_ref(), &opts.to_tobj())?)
}

/// Load an OBJ file as a single attribute stream, merging all of its models.
pub fn load(path: impl AsRef<Path>, opts: &ObjOptions) -> Result<RawAttributes, ObjError> {
    load_models(path, opts).and_then(merge)
}

/// Read every model from OBJ data in memory. Material libraries are not loaded.
pub fn parse_models(
    mut reader: impl BufRead,
    opts: &ObjOptions,
) -> Result<Vec<ObjModel>, ObjError> {
    convert(tobj::load_obj_buf(&mut reader, &opts.to_tobj(), |_| {
        Ok(Default::default())
    })?)
}

/// Read OBJ data in memory as a single attribute stream, merging all of its models.
pub fn parse(reader: impl BufRead, opts: &ObjOptions) -> Result<RawAttributes, ObjError> {
    parse_models(reader, opts).and_then(merge)
}
