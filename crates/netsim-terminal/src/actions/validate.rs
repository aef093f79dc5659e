//! Argument parsing shared by the handlers.

use std::net::Ipv4Addr;

use netsim_types::UserError;

/// Parse a dotted-quad address.
pub fn ipv4(argument: &str, text: &str) -> Result<Ipv4Addr, UserError> {
    text.parse::<Ipv4Addr>()
        .map_err(|_| UserError::invalid(argument, format!("'{text}' is not an IPv4 address")))
}

/// Parse a subnet mask. The one bits must be contiguous.
pub fn mask(argument: &str, text: &str) -> Result<Ipv4Addr, UserError> {
    let addr = ipv4(argument, text)?;
    let bits = u32::from(addr);
    if bits.leading_ones() + bits.trailing_zeros() != 32 {
        return Err(UserError::invalid(
            argument,
            format!("'{text}' is not a contiguous subnet mask"),
        ));
    }
    Ok(addr)
}

/// Number of one bits in a mask.
pub fn prefix_len(mask: Ipv4Addr) -> u32 {
    u32::from(mask).leading_ones()
}

/// Parse a network/mask pair. The address must have no host bits set.
pub fn network(address: &str, netmask: &str) -> Result<(Ipv4Addr, Ipv4Addr), UserError> {
    let net = ipv4("network", address)?;
    let m = mask("mask", netmask)?;
    if u32::from(net) & !u32::from(m) != 0 {
        return Err(UserError::invalid(
            "network",
            format!("{net} has host bits set for mask {m}"),
        ));
    }
    Ok((net, m))
}

/// Parse an 802.1Q VLAN id (1-4094).
pub fn vlan_id(text: &str) -> Result<u16, UserError> {
    match text.parse::<u16>() {
        Ok(id) if (1..=4094).contains(&id) => Ok(id),
        _ => Err(UserError::invalid(
            "vlan-id",
            format!("'{text}' is not a VLAN id (1-4094)"),
        )),
    }
}

/// Parse a bounded unsigned number.
pub fn number<T>(
    argument: &str,
    text: &str,
    range: std::ops::RangeInclusive<T>,
) -> Result<T, UserError>
where
    T: std::str::FromStr + PartialOrd + std::fmt::Display,
{
    match text.parse::<T>() {
        Ok(n) if range.contains(&n) => Ok(n),
        _ => Err(UserError::invalid(
            argument,
            format!("'{text}' is not in range {}-{}", range.start(), range.end()),
        )),
    }
}
