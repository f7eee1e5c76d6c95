// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::io::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use smartfin::models::RawTransaction;
use tempfile::NamedTempFile;

// id, description, signed amount, category, date, type
pub const MOCK_TRANSACTIONS: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("1", "Supermercado Extra", "-456.75", "Alimentação", "2024-03-15", "expense"),
    ("2", "Salário", "5000.00", "Receita Fixa", "2024-03-10", "income"),
    ("3", "Netflix", "-55.90", "Entretenimento", "2024-03-08", "expense"),
    ("4", "Uber", "-32.50", "Transporte", "2024-03-07", "expense"),
    ("5", "Freelance Design", "1200.00", "Receita Extra", "2024-03-05", "income"),
    ("6", "Academia", "-89.90", "Saúde", "2024-03-04", "expense"),
    ("7", "Conta de Luz", "-245.30", "Moradia", "2024-03-03", "expense"),
    ("8", "Internet", "-119.90", "Moradia", "2024-03-02", "expense"),
    ("9", "Venda Item Usado", "350.00", "Receita Extra", "2024-03-01", "income"),
    ("10", "Farmácia", "-76.45", "Saúde", "2024-02-28", "expense"),
    ("11", "Salário", "5000.00", "Receita Fixa", "2024-02-25", "income"),
    ("12", "Restaurante", "-89.90", "Alimentação", "2024-02-20", "expense"),
    ("13", "Presente Aniversário", "-150.00", "Outros", "2024-02-15", "expense"),
    ("14", "Conta de Água", "-98.75", "Moradia", "2024-02-10", "expense"),
    ("15", "Bônus", "1000.00", "Receita Extra", "2024-02-05", "income"),
    ("16", "Salário", "5000.00", "Receita Fixa", "2024-01-25", "income"),
    ("17", "Material Escritório", "-125.30", "Outros", "2024-01-20", "expense"),
    ("18", "Manutenção Carro", "-450.00", "Transporte", "2024-01-15", "expense"),
    ("19", "Consultoria", "800.00", "Receita Extra", "2024-01-10", "income"),
    ("20", "Supermercado", "-385.45", "Alimentação", "2024-01-05", "expense"),
];

pub fn raw(id: &str, description: &str, amount: &str, category: &str, date: &str, kind: &str) -> RawTransaction {
    RawTransaction {
        id: id.into(),
        description: description.into(),
        amount: amount.into(),
        category: category.into(),
        date: Some(date.into()),
        kind: Some(kind.into()),
        icon: None,
    }
}

pub fn mock_raw() -> Vec<RawTransaction> {
    MOCK_TRANSACTIONS
        .iter()
        .map(|(id, d, a, c, dt, k)| raw(id, d, a, c, dt, k))
        .collect()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// The fixture as a CSV file with signed amounts and no type column.
pub fn mock_csv() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "id,description,amount,category,date").unwrap();
    for (id, d, a, c, dt, _) in MOCK_TRANSACTIONS {
        writeln!(file, "{},{},{},{},{}", id, d, a, c, dt).unwrap();
    }
    file.flush().unwrap();
    file
}

pub fn json_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}
