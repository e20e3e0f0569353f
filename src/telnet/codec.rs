//! Telnet option negotiation and inbound stream decoding (RFC 854, RFC 1073).

pub const IAC: u8 = 255;
pub const DONT: u8 = 254;
pub const DO: u8 = 253;
pub const WONT: u8 = 252;
pub const WILL: u8 = 251;
pub const SB: u8 = 250;
pub const SE: u8 = 240;
pub const BRK: u8 = 243;
pub const IP: u8 = 244;

pub const OPT_ECHO: u8 = 1;
pub const OPT_SUPPRESS_GO_AHEAD: u8 = 3;
pub const OPT_NAWS: u8 = 31;

/// Sent right after accept: we echo (the client must not), no go-ahead,
/// and please report window size changes.
pub const NEGOTIATION: &[u8] = &[
    IAC,
    WILL,
    OPT_ECHO,
    IAC,
    WILL,
    OPT_SUPPRESS_GO_AHEAD,
    IAC,
    DO,
    OPT_NAWS,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelnetEvent {
    /// Application bytes with telnet framing removed.
    Data(Vec<u8>),
    /// NAWS report.
    WindowSize { width: u16, height: u16 },
    /// `IAC IP` or `IAC BRK`: the client's interrupt key.
    Interrupt,
}

/// Longest subnegotiation payload kept; NAWS needs five bytes.
const MAX_SUB_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Data,
    /// Previous data byte was CR; swallow a following NUL or LF.
    Cr,
    Iac,
    /// Saw `IAC WILL|WONT|DO|DONT`, the option byte follows.
    Option,
    Sub,
    SubIac,
}

/// Incremental decoder for the client → server direction.
#[derive(Debug)]
pub struct TelnetDecoder {
    state: State,
    sub: Vec<u8>,
}

impl Default for TelnetDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TelnetDecoder {
    pub fn new() -> Self {
        Self {
            state: State::Data,
            sub: Vec::with_capacity(8),
        }
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Vec<TelnetEvent> {
        let mut events = Vec::new();
        let mut data = Vec::new();

        for &byte in bytes {
            match self.state {
                State::Data | State::Cr => {
                    let after_cr = self.state == State::Cr;
                    self.state = State::Data;
                    match byte {
                        IAC => self.state = State::Iac,
                        0 | b'\n' if after_cr => {}
                        b'\r' => {
                            data.push(byte);
                            self.state = State::Cr;
                        }
                        _ => data.push(byte),
                    }
                }
                State::Iac => {
                    self.state = match byte {
                        IAC => {
                            data.push(IAC);
                            State::Data
                        }
                        WILL | WONT | DO | DONT => State::Option,
                        SB => {
                            self.sub.clear();
                            State::Sub
                        }
                        IP | BRK => {
                            if !data.is_empty() {
                                events.push(TelnetEvent::Data(std::mem::take(&mut data)));
                            }
                            events.push(TelnetEvent::Interrupt);
                            State::Data
                        }
                        // NOP, GA, AYT, ... carry no payload.
                        _ => State::Data,
                    };
                }
                State::Option => {
                    // Option replies are accepted silently; we never renegotiate.
                    self.state = State::Data;
                }
                State::Sub => match byte {
                    IAC => self.state = State::SubIac,
                    _ => self.push_sub(byte),
                },
                State::SubIac => match byte {
                    SE => {
                        self.state = State::Data;
                        if !data.is_empty() {
                            events.push(TelnetEvent::Data(std::mem::take(&mut data)));
                        }
                        if let Some(event) = self.finish_subnegotiation() {
                            events.push(event);
                        }
                    }
                    IAC => {
                        self.push_sub(IAC);
                        self.state = State::Sub;
                    }
                    _ => {
                        // Malformed; abandon the subnegotiation.
                        self.sub.clear();
                        self.state = State::Data;
                    }
                },
            }
        }

        if !data.is_empty() {
            events.push(TelnetEvent::Data(data));
        }
        events
    }

    /// Bytes past the limit are dropped; the payload then fails to match
    /// any known option and is ignored.
    fn push_sub(&mut self, byte: u8) {
        if self.sub.len() <= MAX_SUB_LEN {
            self.sub.push(byte);
        }
    }

    fn finish_subnegotiation(&mut self) -> Option<TelnetEvent> {
        let sub = std::mem::take(&mut self.sub);
        match sub.as_slice() {
            [OPT_NAWS, w_hi, w_lo, h_hi, h_lo] => Some(TelnetEvent::WindowSize {
                width: u16::from_be_bytes([*w_hi, *w_lo]),
                height: u16::from_be_bytes([*h_hi, *h_lo]),
            }),
            _ => None,
        }
    }
}
