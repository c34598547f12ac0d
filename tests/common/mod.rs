#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

pub const HEADER: &str = "Jenis Produk,Tanggal,Harga,Jumlah Order,Total";

/// Comma-separated export with one row per quirk the cleaner handles.
pub const SALES_CSV: &str = "\
Jenis Produk,Tanggal,Harga,Jumlah Order,Total
Stiker A4,03/04/2024,1500,10,15000
Kartu Nama,03/04/2024,Rp 25000,2,50000
CraftLaminasi,04/04/2024,\"1.234,56\",1,1234
,05/04/2024,2000,3,6000
Stiker A4,05/04/2024,N/A,4,6000
Banner,06/04/2024,\"50,000.00\",1,45000
";

/// The same kind of data exported with `;` and decimal commas.
pub const SEMICOLON_CSV: &str = "\
Jenis Produk;Tanggal;Harga;Jumlah Order;Total
Stiker A4;01/02/2024;1.500,50;2;3.001,00
Banner;02/02/2024;50.000,00;1;50.000,00
";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}
