//! One-off generator for the demo's data-file layout.
//!
//! Idempotent: existing directories and files are left untouched and
//! reported as such, so re-running is always safe.

use std::fs;
use std::path::{Path, PathBuf};

const USERS_CSV: &str = "\
UserID,Username,Password
1,alice,wonderland
2,bob,builder
3,carol,singer
";

const PRODUCTS_CSV: &str = "\
ProductID,ProductName,Category,Price,ImageURL,Size,Brand,Material,Color
101,Trail Runner,Shoes,2499,https://example.com/img/101.png,9,Stride,Mesh,Red
102,Court Classic,Shoes,899,https://example.com/img/102.png,8,Stride,Leather,White
103,Leather Boot,Shoes,4999,https://example.com/img/103.png,10,Northpeak,Leather,Brown
104,Rain Jacket,Outerwear,3499,https://example.com/img/104.png,M,Northpeak,Nylon,Blue
105,Wool Scarf,Accessories,599,https://example.com/img/105.png,,Loomcraft,Wool,Grey
106,Canvas Tote,Accessories,799,https://example.com/img/106.png,,Loomcraft,Canvas,Beige
107,Down Vest,Outerwear,2899,https://example.com/img/107.png,L,Northpeak,Down,Black
108,Running Socks,Shoes,299,https://example.com/img/108.png,9,Stride,Cotton,White
109,Denim Jacket,Outerwear,1999,https://example.com/img/109.png,M,Loomcraft,Denim,Blue
110,Baseball Cap,Accessories,499,https://example.com/img/110.png,,Stride,Cotton,Navy
";

const PURCHASE_HISTORY_CSV: &str = "\
UserID,ProductID
1,101
1,105
2,104
2,102
3,110
";

fn create_directory(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        println!("Directory already exists: {}", path.display());
    } else {
        fs::create_dir_all(path)?;
        println!("Created directory: {}", path.display());
    }
    Ok(())
}

fn create_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if path.exists() {
        println!("File already exists: {}", path.display());
    } else {
        fs::write(path, contents)?;
        println!("Created file: {}", path.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let data_dir = root.join("data");
    create_directory(&data_dir)?;
    create_file(&data_dir.join("users.csv"), USERS_CSV)?;
    create_file(&data_dir.join("products.csv"), PRODUCTS_CSV)?;
    create_file(&data_dir.join("purchase_history.csv"), PURCHASE_HISTORY_CSV)?;

    create_directory(&root.join("store"))?;

    println!("Data directory setup complete.");
    Ok(())
}
