// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use alloy::sol;

sol! {
    /// Fixed externally-deployed strike executor. One payable entry point:
    /// the attached native value funds a wrapped-native -> tokenIn -> tokenOut
    /// triangle routed through the given router.
    #[sol(rpc)]
    interface TriangularExecutor {
        function triangularSwap(
            address router,
            address tokenIn,
            address tokenOut,
            uint256 amountIn
        ) external payable;
    }

    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract SwapRouter {
        function getAmountsOut(uint256 amountIn, address[] calldata path) external view returns (uint256[] memory amounts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};
    use alloy::sol_types::SolCall;

    #[test]
    fn triangular_swap_calldata_roundtrips() {
        let call = TriangularExecutor::triangularSwapCall {
            router: Address::from([0xaa; 20]),
            tokenIn: Address::from([0xbb; 20]),
            tokenOut: Address::from([0xcc; 20]),
            amountIn: U256::from(7_000_000_000_000_000u64),
        };

        let encoded = call.abi_encode();
        assert_eq!(&encoded[..4], TriangularExecutor::triangularSwapCall::SELECTOR);

        let decoded =
            TriangularExecutor::triangularSwapCall::abi_decode(&encoded).expect("decode call");
        assert_eq!(decoded.router, call.router);
        assert_eq!(decoded.tokenIn, call.tokenIn);
        assert_eq!(decoded.tokenOut, call.tokenOut);
        assert_eq!(decoded.amountIn, call.amountIn);
    }
}
