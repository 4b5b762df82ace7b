use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TRANSFER_INVOICE: &str = "\
Sähkönsiirtolasku
Asiakasnumero 123456
\u{0c}Erittely
Laskutusjakso 1.1.2023 - 31.1.2023
Perusmaksu 31 pv 10,00 EUR
Päiväsiirto 1000 kWh 5,00 snt/kWh 50,00 EUR
Yösiirto 800 kWh 3,00 snt/kWh 24,00 EUR
Sähkövero 1800 kWh 7,50 EUR
";

const ENERGY_INVOICE: &str = "\
Sähkölasku
\u{0c}Sähköenergia
perusmaksu 1.1.2023-31.1.2023 4,90 e
energia 1.1.2023-31.1.2023 2 000 kWh 10,00 c/kWh 200,00 e
";

const CHARGING_INVOICE: &str = "\
2023-03-04 18:22 (01:15:30, 12.34kWh)
1 3,95 24% 3,95 €
\u{0c}2023-03-18 07:05 (00:45:00, 8.5kWh)
2 2,50 10% 5,00 €
";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), "{}").unwrap();
        Self { dir }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn laskut(&self) -> Command {
        let mut cmd = Command::cargo_bin("laskut").unwrap();
        cmd.arg("-c").arg(self.dir.path().join("config.json"));
        cmd
    }
}

#[test]
fn transfer_report_to_stdout() {
    let fx = Fixture::new();
    let input = fx.write("caruna.txt", TRANSFER_INVOICE);

    fx.laskut()
        .arg("transfer")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Kuukausi,Perusmaksu (energia)"))
        .stdout(predicate::str::contains(
            "Tammikuu,,10.00,,,,,1000,50.00,800,24.00,7.50",
        ));
}

#[test]
fn combined_report_into_directory() {
    let fx = Fixture::new();
    let transfer = fx.write("caruna.txt", TRANSFER_INVOICE);
    let energy = fx.write("helen.txt", ENERGY_INVOICE);
    let out_dir = fx.path().join("out");
    fs::create_dir(&out_dir).unwrap();

    fx.laskut()
        .arg("combined")
        .arg("--transfer")
        .arg(&transfer)
        .arg("--energy")
        .arg(&energy)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let report = fs::read_to_string(out_dir.join("caruna-helen-report.csv")).unwrap();
    let rows: Vec<&str> = report.lines().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1],
        "Tammikuu,4.90,10.00,1200,120.00,1000,100.00,1000,50.00,800,24.00,7.50"
    );
}

#[test]
fn energy_report_with_manual_splits() {
    let fx = Fixture::new();
    let input = fx.write("helen.txt", ENERGY_INVOICE);

    fx.laskut()
        .arg("energy")
        .arg(&input)
        .arg("--day-transfer")
        .arg("2023-01:1000")
        .arg("--night-transfer")
        .arg("2023-01:800")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tammikuu,4.90,,1200,120.00,1000,100.00,,,,,"));
}

#[test]
fn energy_rejects_malformed_split_list() {
    let fx = Fixture::new();
    let input = fx.write("helen.txt", ENERGY_INVOICE);

    fx.laskut()
        .arg("energy")
        .arg(&input)
        .arg("--day-transfer")
        .arg("tammikuu:1000")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--day-transfer"));
}

#[test]
fn charging_report_as_json() {
    let fx = Fixture::new();
    let input = fx.write("plugsurfing.txt", CHARGING_INVOICE);

    fx.laskut()
        .arg("charging")
        .arg(&input)
        .arg("-f")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"Maaliskuu\""))
        .stdout(predicate::str::contains("\"sessions\": 2"));
}

#[test]
fn charging_report_csv() {
    let fx = Fixture::new();
    let input = fx.write("plugsurfing.txt", CHARGING_INVOICE);

    fx.laskut()
        .arg("charging")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("2023,3,3,2.98,8.95,20.84"));
}

#[test]
fn english_headers_from_config() {
    let fx = Fixture::new();
    let config = fx.write("en.json", r#"{"locale": {"language": "en"}}"#);
    let input = fx.write("caruna.txt", TRANSFER_INVOICE);

    Command::cargo_bin("laskut")
        .unwrap()
        .arg("-c")
        .arg(&config)
        .arg("transfer")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Month,Basic pay (energy)"))
        .stdout(predicate::str::contains("January,,10.00"));
}

#[test]
fn missing_page_fails() {
    let fx = Fixture::new();
    let input = fx.write("single.txt", "Laskutusjakso 1.1.2023 - 31.1.2023\n");

    fx.laskut()
        .arg("transfer")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("page 2 requested"));
}

#[test]
fn missing_input_fails() {
    let fx = Fixture::new();

    fx.laskut()
        .arg("transfer")
        .arg(fx.path().join("nope.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let fx = Fixture::new();
    let target = fx.path().join("nested").join("config.json");

    Command::cargo_bin("laskut")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("\"indeterminate_marker\": \"n/a\""));

    Command::cargo_bin("laskut")
        .unwrap()
        .args(["config", "init", "--output"])
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn config_show_reads_file_given_with_c() {
    let fx = Fixture::new();
    let config = fx.write("my.json", r#"{"locale": {"language": "en"}}"#);

    Command::cargo_bin("laskut")
        .unwrap()
        .arg("-c")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"language\": \"en\""));
}

#[test]
fn config_set_then_get_uses_file_given_with_c() {
    let fx = Fixture::new();

    fx.laskut()
        .args(["config", "set", "pages.energy_page", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set pages.energy_page = 3"));

    fx.laskut()
        .args(["config", "get", "pages.energy_page"])
        .assert()
        .success()
        .stdout("3\n");

    let saved = fs::read_to_string(fx.path().join("config.json")).unwrap();
    assert!(saved.contains("\"energy_page\": 3"));

    fx.laskut()
        .args(["config", "set", "pages.transfer_page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page number starting from 1"));
}
