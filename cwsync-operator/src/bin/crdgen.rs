//! Prints the CustomResourceDefinitions managed by the operator as YAML.
//!
//! ```sh
//! crdgen | kubectl apply -f -
//! ```

use cwsync_operator::crd::all_crds;
use cwsync_operator::observability::{TracingConfig, init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing(&TracingConfig::from_env())?;

    let crds = all_crds();
    tracing::debug!(count = crds.len(), "Generating CRDs");

    for crd in crds {
        println!("---");
        print!("{}", serde_yaml::to_string(&crd)?);
    }
    Ok(())
}
