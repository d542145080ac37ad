use std::path::PathBuf;

use clap::{Parser, Subcommand};
use futures_util::future::BoxFuture;
use route_tree::tree::scan_dir;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "routetree-cli")]
#[command(about = "Inspect a route directory tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the route tree a directory would mount.
    ///
    /// Markers directly under the root are listed but never mounted.
    Inspect {
        /// Routes root directory
        dir: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct TreeNode {
    segment: String,
    methods: Vec<String>,
    has_index: bool,
    ignored: Vec<String>,
    duplicates: Vec<String>,
    children: Vec<TreeNode>,
}

fn walk(dir: PathBuf, segment: String) -> BoxFuture<'static, std::io::Result<TreeNode>> {
    Box::pin(async move {
        let scan = scan_dir(&dir).await?;
        let mut children = Vec::with_capacity(scan.subdirs.len());
        for child in &scan.subdirs {
            children.push(walk(dir.join(child), child.clone()).await?);
        }
        Ok(TreeNode {
            segment,
            methods: scan.methods.iter().map(|m| m.method.to_string()).collect(),
            has_index: scan.index.is_some(),
            ignored: scan.ignored,
            duplicates: scan.duplicates,
            children,
        })
    })
}

fn print_node(node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);

    let mut tags = Vec::new();
    if !node.methods.is_empty() {
        tags.push(
            node.methods
                .iter()
                .map(|m| m.to_uppercase())
                .collect::<Vec<_>>()
                .join(" "),
        );
    }
    if node.has_index {
        tags.push("index".to_string());
    }
    let tags = if tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", tags.join(", "))
    };

    println!("{indent}{}/{tags}", node.segment);
    for stem in &node.duplicates {
        println!("{indent}  ! duplicate marker: {stem}");
    }
    for child in &node.children {
        print_node(child, depth + 1);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { dir, json } => {
            let root = walk(dir.clone(), dir.display().to_string()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&root)?);
            } else {
                print_node(&root, 0);
            }
        }
    }

    Ok(())
}
