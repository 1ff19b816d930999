//! Human-readable rendering.

use alloy_primitives::utils::format_ether;
use txlens::{BatchPayload, DecodedCall, DecodedError, DecodedEvent, TransactionReport};
use txlens_core::NamedParams;

pub fn print_report(report: &TransactionReport) {
    let tx = &report.transaction;
    println!("Hash:        {}", tx.hash);
    println!("Network:     {}", tx.chain);
    println!("Status:      {}", tx.status);
    println!("Block:       {} ({})", tx.block_number, tx.block_hash);
    match tx.datetime() {
        Some(dt) => println!("Timestamp:   {} ({})", tx.timestamp, dt.to_rfc3339()),
        None => println!("Timestamp:   {}", tx.timestamp),
    }
    println!("From:        {}", tx.from);
    match (tx.to, tx.contract_address) {
        (Some(to), _) => println!("To:          {to}"),
        (None, Some(created)) => println!("To:          [contract creation] {created}"),
        (None, None) => println!("To:          [contract creation]"),
    }
    println!("Value:       {} {}", format_ether(tx.value), tx.chain.native_symbol);
    println!("Fee:         {} {}", format_ether(tx.fee()), tx.chain.native_symbol);
    println!("Nonce:       {}", tx.nonce);
    println!("Type:        {}", tx.tx_type);
    println!("Index:       {}", tx.transaction_index);
    println!();

    print_call(&report.call);

    match &report.events {
        None => println!("\nEvents:      none"),
        Some(events) => {
            println!("\nEvents ({}):", events.len());
            for (i, ev) in events.iter().enumerate() {
                print_event(i, ev);
            }
        }
    }

    if let Some(batch) = &report.batch {
        println!();
        print_batch(batch);
    }
}

pub fn print_call(call: &DecodedCall) {
    match &call.method_name {
        Some(name) => {
            println!("Method:      {name}");
            if let Some(sig) = &call.signature {
                println!("Signature:   {sig}");
            }
            if let Some(sel) = call.selector_hex() {
                println!("Selector:    {sel}");
            }
            print_params(&call.params, "  ");
        }
        None => {
            println!("Method:      unknown");
            if let Some(sel) = call.selector_hex() {
                println!("Selector:    {sel}");
            }
        }
    }
    if let Some(url) = &call.provenance_url {
        println!("Source:      {url}");
    }
    println!("Input:       {}", call.raw_hex);
}

pub fn print_error(err: &DecodedError) {
    match &err.error_name {
        Some(name) => {
            println!("Error:       {name}");
            if let Some(sig) = &err.signature {
                println!("Signature:   {sig}");
            }
            print_params(&err.params, "  ");
            if let Some(detail) = &err.detail {
                println!("Meaning:     {detail}");
            }
        }
        None => println!("Error:       unknown"),
    }
    if let Some(url) = &err.provenance_url {
        println!("Source:      {url}");
    }
    println!("Data:        {}", err.raw_hex);
}

fn print_event(index: usize, ev: &DecodedEvent) {
    match &ev.address {
        Some(addr) => println!("  [{index}] {} @ {addr}", ev.name),
        None => println!("  [{index}] {}", ev.name),
    }
    if ev.is_unknown() {
        for (i, t) in ev.topics.iter().enumerate() {
            println!("      topic{i}: {t}");
        }
        println!("      data: {}", ev.raw_data);
    } else {
        print_params(&ev.params, "      ");
    }
}

pub fn print_batch(batch: &BatchPayload) {
    match batch {
        BatchPayload::RollupData(data) => {
            println!("Batch:       rollup data ({} bytes)", data.len());
        }
        BatchPayload::DaCert(cert) => {
            println!("Batch:       DA certificate");
            println!("  header:              {}", cert.header);
            println!("  keysetHash:          {}", cert.keyset_hash);
            println!("  dataHash:            {}", cert.data_hash);
            println!("  timeout:             {}", cert.timeout);
            println!("  version:             {}", cert.version);
            println!("  signerMask:          {}", cert.signer_mask);
            println!("  aggregateSignature:  {}", cert.aggregate_signature);
        }
    }
}

fn print_params(params: &NamedParams, indent: &str) {
    for (name, value) in params {
        println!("{indent}{name}: {value}");
    }
}
