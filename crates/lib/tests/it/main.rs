/*! Integration tests for cfgtree.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * - tree_ops: Path addressing, set/add/get, subtree handles, clear
 * - merge: Recursive loading of decoded values with the replace-or-keep policy
 * - typed: Typed accessor coercions
 * - concurrency: Multi-threaded readers and writers on one tree
 * - codec: JSON/YAML byte and file loaders
 * - logging: Logger bootstrap from tree settings
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("cfgtree=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod codec;
mod tree_ops;
