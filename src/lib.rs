//! Relatório mensal de vendas: agrega uma tabela SQLite e gera um PDF com a
//! tabela diária e o gráfico de totais por mês.

pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod services;
