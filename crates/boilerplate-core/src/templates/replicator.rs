//! Template tree replication onto disk
//!
//! Replication only ever creates or overwrites entries. Running it several
//! times against the same destination layers the trees: a later tree's file
//! replaces an earlier file at the same relative path, everything else is
//! left alone. There is no rollback; a failure leaves what was written so far.

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::templates::node::{ExclusionSet, TemplateDir, TemplateNode};
use std::fs;
use std::path::Path;

/// Copy `source` into `destination`, skipping excluded names.
///
/// Returns the number of files written.
pub fn replicate(
    source: &TemplateDir,
    destination: &Path,
    exclusions: &ExclusionSet,
) -> ScaffoldResult<usize> {
    replicate_with_progress(source, destination, exclusions, &mut |_: &Path| {})
}

/// Same as [`replicate`], calling `progress` with each path before it is written
pub fn replicate_with_progress<F>(
    source: &TemplateDir,
    destination: &Path,
    exclusions: &ExclusionSet,
    progress: &mut F,
) -> ScaffoldResult<usize>
where
    F: FnMut(&Path),
{
    fs::create_dir_all(destination)
        .map_err(|e| ScaffoldError::write_failed(destination, e))?;

    let mut written = 0;
    for (name, node) in source.children() {
        if exclusions.contains(name) {
            tracing::debug!(name, "skipping excluded entry");
            continue;
        }

        let path = destination.join(name);
        progress(&path);

        match node {
            TemplateNode::File(contents) => {
                fs::write(&path, contents).map_err(|e| ScaffoldError::write_failed(&path, e))?;
                tracing::trace!(path = %path.display(), bytes = contents.len(), "wrote file");
                written += 1;
            }
            TemplateNode::Directory(dir) => {
                written += replicate_with_progress(dir, &path, exclusions, progress)?;
            }
        }
    }

    Ok(written)
}
