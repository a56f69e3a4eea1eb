// Cœur du simulateur : état des routeurs, tables de routage et registre du réseau

pub mod routing_table;
pub mod router;
pub mod network;
